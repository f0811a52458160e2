#[derive(Debug, Clone, PartialEq)]
pub enum CharmError {
    InvalidPanelWidth { width: f32 },
    InvalidConfig { field: &'static str, reason: &'static str },
    UnsupportedOperation { operation: &'static str },
    NotAttached { operation: &'static str },
}

impl std::fmt::Display for CharmError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CharmError::InvalidPanelWidth { width } => {
                write!(f, "panel width must be positive and finite, got {width}")
            }
            CharmError::InvalidConfig { field, reason } => {
                write!(f, "invalid charm config: {field} {reason}")
            }
            CharmError::UnsupportedOperation { operation } => {
                write!(f, "unsupported operation: {operation}")
            }
            CharmError::NotAttached { operation } => {
                write!(f, "{operation} requires an applied template")
            }
        }
    }
}

impl std::error::Error for CharmError {}

pub(crate) fn check_width(width: f32) -> Result<f32, CharmError> {
    if width.is_finite() && width > 0.0 {
        Ok(width)
    } else {
        Err(CharmError::InvalidPanelWidth { width })
    }
}
