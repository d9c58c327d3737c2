use thiserror::Error;

use crate::Locale;

#[derive(Debug, Error)]
pub enum MessagesError {
    #[error("message bundle for '{locale}' is not valid JSON: {source}")]
    Parse {
        locale: Locale,
        #[source]
        source: serde_json::Error,
    },
    #[error("message bundle for '{0}' must be a JSON object at the top level")]
    NotAnObject(Locale),
    #[error("no message bundle registered for '{0}'")]
    Missing(Locale),
}
