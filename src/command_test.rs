use super::*;
use std::collections::HashSet;

#[test]
fn every_command_has_a_distinct_api_path() {
    let paths: HashSet<_> = Command::ALL.iter().map(|c| c.path()).collect();
    assert_eq!(paths.len(), Command::ALL.len());
    assert!(paths.iter().all(|p| p.starts_with("/api/")));
}

#[test]
fn scare_paths_follow_kind() {
    for kind in ScareKind::ALL {
        assert_eq!(Command::Scare(kind).path(), format!("/api/scare/{kind}"));
    }
}

#[test]
fn scare_fallback_is_generic() {
    for kind in ScareKind::ALL {
        assert_eq!(Command::Scare(kind).fallback_message(), GENERIC_FAILURE);
    }
    assert_eq!(Command::ToggleMotion.fallback_message(), "Failed to toggle motion detection");
    assert_eq!(Command::StartShow.fallback_message(), "Failed to start show");
    assert_eq!(Command::StopShow.fallback_message(), "Failed to stop show");
}

#[test]
fn scare_kind_parses_case_insensitively() {
    assert_eq!("FULL".parse::<ScareKind>(), Ok(ScareKind::Full));
    assert_eq!(" sound ".parse::<ScareKind>(), Ok(ScareKind::Sound));
    assert!("fog".parse::<ScareKind>().unwrap_err().contains("unknown scare kind"));
}

#[test]
fn command_display_names() {
    assert_eq!(Command::ToggleMotion.to_string(), "motion:toggle");
    assert_eq!(Command::Scare(ScareKind::Prop).to_string(), "scare:prop");
    assert_eq!(Command::StopShow.to_string(), "show:stop");
}
