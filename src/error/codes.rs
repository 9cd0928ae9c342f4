#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success = 0,
    GeneralError = 1,
    InvalidArguments = 2,
    SourceNotFound = 3,
    PermissionError = 4,
    ScanError = 5,
    ManifestError = 6,
    DestinationError = 7,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success as i32, 0);
        assert_eq!(ExitCode::GeneralError as i32, 1);
        assert_eq!(ExitCode::InvalidArguments as i32, 2);
        assert_eq!(ExitCode::SourceNotFound as i32, 3);
        assert_eq!(ExitCode::PermissionError as i32, 4);
        assert_eq!(ExitCode::ScanError as i32, 5);
        assert_eq!(ExitCode::ManifestError as i32, 6);
        assert_eq!(ExitCode::DestinationError as i32, 7);
    }

    #[test]
    fn test_exit_code_into_i32() {
        let code: i32 = ExitCode::SourceNotFound.into();
        assert_eq!(code, 3);
    }
}
