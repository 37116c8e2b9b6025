pub mod config;
pub mod error;
pub mod loader;
pub mod lookup;
pub mod table;

pub use config::Settings;
pub use error::{LookupError, SettingsError, TableError};
pub use lookup::{
    exact::lookup, weighted::weighted_average, Query, QueryValue, TableLookup, EMPTY_AVERAGE,
    NOT_FOUND,
};
pub use table::{cache::TableCache, parse::parse_table, ParsedTable};

#[cfg(test)]
pub(crate) fn init_test_logging() {
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tablematch=debug")),
        )
        .with_test_writer()
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}
