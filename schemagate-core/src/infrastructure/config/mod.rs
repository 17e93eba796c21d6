pub mod server;

pub use crate::domain::config::{
    ApolloConfig, ApolloConfigInput, DocumentStoreConfig, SchemaSourceConfig, ServerConfig,
};
pub use server::{load_server_config, load_server_config_file};
