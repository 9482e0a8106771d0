#[path = "shared/launch.rs"]
mod launch;

fn main() -> std::process::ExitCode {
    launch::launch(configs::ServiceKind::Profiles)
}
