fn main() -> std::process::ExitCode {
    symptom_triage_lib::run()
}
