use log::error;
use std::env;
use std::path::PathBuf;

use recipesnap::capture::{CommandCamera, ImageSource};
use recipesnap::{view, PipelineState, Session, SnapConfig, SnapError};

const USAGE: &str = "Usage:
  recipesnap <image-file>                detect ingredients and generate recipes
  recipesnap --detect-only <image-file>  only detect ingredients
  recipesnap --camera                    capture from the configured camera
  recipesnap health                      check the detection backend";

enum Command {
    Health,
    Run { camera: bool, path: Option<PathBuf>, detect_only: bool },
}

fn parse_args(args: &[String]) -> Result<Command, String> {
    let mut camera = false;
    let mut detect_only = false;
    let mut path = None;

    for arg in args {
        match arg.as_str() {
            "health" if args.len() == 1 => return Ok(Command::Health),
            "--camera" => camera = true,
            "--detect-only" => detect_only = true,
            "-h" | "--help" => return Err(USAGE.to_string()),
            other if other.starts_with("--") => {
                return Err(format!("Unknown option {}\n\n{}", other, USAGE))
            }
            other if path.is_none() => path = Some(PathBuf::from(other)),
            _ => return Err("Only one image can be processed at a time".to_string()),
        }
    }

    if camera == path.is_some() {
        return Err(USAGE.to_string());
    }
    Ok(Command::Run {
        camera,
        path,
        detect_only,
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let command = match parse_args(&args) {
        Ok(command) => command,
        Err(message) => {
            eprintln!("{}", message);
            std::process::exit(2);
        }
    };
    let config = SnapConfig::load()?;

    match command {
        Command::Health => {
            let health = recipesnap::check_health(&config).await?;
            println!(
                "status: {}, models loaded: {}",
                health.status, health.models_loaded
            );
        }
        Command::Run {
            camera,
            path,
            detect_only,
        } => {
            let mut session = Session::from_config(&config)?;

            let captured = match path {
                Some(path) if !camera => session.capture(&ImageSource::Path(path)).await,
                _ => match CommandCamera::new(&config.camera) {
                    Ok(device) => session.capture_from_camera(&device).await,
                    Err(e) => Err(e),
                },
            };
            if let Err(e) = captured {
                if let SnapError::AdapterUnavailable(_) = e {
                    error!("Camera unavailable: {}", e);
                    eprintln!("Camera is not available. Pass an image file instead.");
                } else {
                    eprintln!("{}", e);
                }
                std::process::exit(1);
            }
            println!("{}", view::render(session.controller()));

            if detect_only || !session.controller().can_generate() {
                exit_on_failure(session.controller().state());
                return Ok(());
            }

            session.generate().await?;
            println!("{}", view::render(session.controller()));
            exit_on_failure(session.controller().state());
        }
    }

    Ok(())
}

fn exit_on_failure(state: PipelineState) {
    if let PipelineState::Error(_) = state {
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_file() {
        match parse_args(&args(&["fridge.jpg"])) {
            Ok(Command::Run {
                camera,
                path,
                detect_only,
            }) => {
                assert!(!camera);
                assert_eq!(path, Some(PathBuf::from("fridge.jpg")));
                assert!(!detect_only);
            }
            _ => panic!("expected a run command"),
        }
    }

    #[test]
    fn test_parse_camera_detect_only() {
        match parse_args(&args(&["--camera", "--detect-only"])) {
            Ok(Command::Run {
                camera,
                path,
                detect_only,
            }) => {
                assert!(camera);
                assert!(path.is_none());
                assert!(detect_only);
            }
            _ => panic!("expected a run command"),
        }
    }

    #[test]
    fn test_parse_health() {
        assert!(matches!(parse_args(&args(&["health"])), Ok(Command::Health)));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(parse_args(&args(&[])).is_err());
        assert!(parse_args(&args(&["a.jpg", "b.jpg"])).is_err());
        assert!(parse_args(&args(&["--camera", "a.jpg"])).is_err());
        assert!(parse_args(&args(&["--verbose"])).is_err());
    }
}
