use justconfig::error::ConfigError;
use justconfig::item::{MapAction, StringItem};

/// Strips one pair of surrounding double quotes from configuration values.
pub trait StripQuotes
where
    Self: Sized,
{
    fn strip_quotes(self) -> Result<StringItem, ConfigError>;
}

impl StripQuotes for Result<StringItem, ConfigError> {
    /// Values are trimmed first. A value is only changed when it both starts and
    /// ends with `"`; unquoted values pass through untouched, so paths can be
    /// written either way.
    fn strip_quotes(self) -> Result<StringItem, ConfigError> {
        self?.map(|raw| {
            let trimmed = raw.trim();
            match trimmed
                .strip_prefix('"')
                .and_then(|rest| rest.strip_suffix('"'))
            {
                Some(inner) => MapAction::Replace(vec![inner.to_owned()]),
                None if trimmed.len() != raw.len() => MapAction::Replace(vec![trimmed.to_owned()]),
                None => MapAction::Keep,
            }
        })
    }
}
