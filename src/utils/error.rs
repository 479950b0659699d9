use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Input error: {message}")]
    InputError { message: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Output,
    Processing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::ConfigError { .. }
            | EtlError::ConfigValidationError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::MissingConfigError { .. } => ErrorCategory::Configuration,
            EtlError::InputError { .. } | EtlError::CsvError(_) => ErrorCategory::Input,
            EtlError::ZipError(_) | EtlError::IoError(_) => ErrorCategory::Output,
            EtlError::SerializationError(_) | EtlError::ProcessingError { .. } => {
                ErrorCategory::Processing
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::Processing => ErrorSeverity::High,
            ErrorCategory::Output => ErrorSeverity::Critical,
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EtlError::ConfigError { message } => format!("設定錯誤: {}", message),
            EtlError::ConfigValidationError { field, message } => {
                format!("設定欄位 '{}' 無效: {}", field, message)
            }
            EtlError::InvalidConfigValueError { field, value, reason } => {
                format!("設定 '{}' 的值 '{}' 無效: {}", field, value, reason)
            }
            EtlError::MissingConfigError { field } => format!("缺少必要設定: {}", field),
            EtlError::InputError { message } => format!("無法讀取輸入: {}", message),
            EtlError::CsvError(e) => format!("CSV 格式錯誤: {}", e),
            EtlError::IoError(e) => format!("檔案存取失敗: {}", e),
            EtlError::ZipError(e) => format!("壓縮檔建立失敗: {}", e),
            EtlError::SerializationError(e) => format!("JSON 序列化失敗: {}", e),
            EtlError::ProcessingError { message } => format!("處理失敗: {}", message),
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => {
                "Check the command line flags or the TOML file, then run again".to_string()
            }
            ErrorCategory::Input => {
                "Make sure the input file exists and matches --format (blocks or csv)".to_string()
            }
            ErrorCategory::Output => {
                "Check that the output directory is writable and has free space".to_string()
            }
            ErrorCategory::Processing => "Re-run with --verbose to see which record failed".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
