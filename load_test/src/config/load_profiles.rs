use super::ThinkTime;

/// Default shape of a run: how many users, how fast they start, how long they think.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadProfile {
    pub users: usize,
    pub spawn_rate: f64,
    pub think_time: ThinkTime,
}

/// Get load profile by name
pub fn get_load_profile(profile: &str) -> LoadProfile {
    match profile {
        "smoke" => smoke_profile(),
        "standard" => standard_profile(),
        "stress" => stress_profile(),
        _ => {
            tracing::warn!("Unknown profile '{}', using 'standard' profile", profile);
            standard_profile()
        }
    }
}

/// Smoke profile for checking connectivity and credentials
///
/// - 1 user
/// - started immediately
/// - 1-2s think-time
pub fn smoke_profile() -> LoadProfile {
    LoadProfile {
        users: 1,
        spawn_rate: 1.0,
        think_time: ThinkTime { min: 1.0, max: 2.0 },
    }
}

/// Standard profile modelling interactive console users
///
/// - 10 users
/// - 2 users/sec ramp-up
/// - 1-10s think-time
pub fn standard_profile() -> LoadProfile {
    LoadProfile {
        users: 10,
        spawn_rate: 2.0,
        think_time: ThinkTime::default(),
    }
}

/// Stress profile for finding the saturation point
///
/// - 200 users
/// - 20 users/sec ramp-up
/// - 0.5-2s think-time
pub fn stress_profile() -> LoadProfile {
    LoadProfile {
        users: 200,
        spawn_rate: 20.0,
        think_time: ThinkTime { min: 0.5, max: 2.0 },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_profile_falls_back_to_standard() {
        assert_eq!(get_load_profile("nope"), standard_profile());
    }

    #[test]
    fn test_profiles_have_valid_think_time() {
        for name in ["smoke", "standard", "stress"] {
            assert!(get_load_profile(name).think_time.validate().is_ok(), "{name}");
        }
    }
}
