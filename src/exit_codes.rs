//! Process exit codes.
//!
//! Values follow BSD `sysexits.h` where one fits; codes from 100 up are
//! specific to binocle and describe failures reported by the Looker instance.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinocleExitCode {
    Success = 0,
    /// Bad flags, arguments, or missing connection settings
    UsageError = 64,
    /// Malformed patch or an unexpected response shape
    DataError = 65,
    /// Content or folder does not exist (or was hard deleted)
    NotFound = 67,
    /// A prompt was cancelled
    TempFail = 69,
    SoftwareError = 70,
    OSError = 71,
    /// Unreadable configuration file
    ConfigError = 78,
    /// Login rejected or session not authorized
    AuthError = 100,
    NetworkError = 101,
    /// Any other non-successful response
    ApiError = 102,
}

impl BinocleExitCode {
    pub fn code(&self) -> i32 {
        *self as i32
    }

    pub fn message(&self) -> &'static str {
        match self {
            BinocleExitCode::Success => "success",
            BinocleExitCode::UsageError => "usage error",
            BinocleExitCode::DataError => "invalid data",
            BinocleExitCode::NotFound => "not found",
            BinocleExitCode::TempFail => "cancelled",
            BinocleExitCode::SoftwareError => "internal error",
            BinocleExitCode::OSError => "operating system error",
            BinocleExitCode::ConfigError => "configuration error",
            BinocleExitCode::AuthError => "authentication error",
            BinocleExitCode::NetworkError => "network error",
            BinocleExitCode::ApiError => "Looker API error",
        }
    }
}

impl From<BinocleExitCode> for i32 {
    fn from(code: BinocleExitCode) -> Self {
        code.code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_match_sysexits() {
        assert_eq!(i32::from(BinocleExitCode::UsageError), 64);
        assert_eq!(BinocleExitCode::NotFound.code(), 67);
        assert_eq!(BinocleExitCode::ApiError.message(), "Looker API error");
    }
}
