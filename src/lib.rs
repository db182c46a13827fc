pub mod adlog;
pub mod dimension;
pub mod druid;
pub mod envelope;
pub mod gateway;
pub mod query;
pub mod server;

pub use adlog::{
    generate_sample_logs, write_csv, AdImpressionLog, ChannelEntry, GeneratorConfig,
    GeneratorError, ScheduleInterval,
};
pub use dimension::Dimension;
pub use druid::{DruidClient, DruidConfig, DruidError, ResultRow};
pub use envelope::ApiResponse;
pub use gateway::fetch_grouped_counts;
pub use query::{impressions_by_dimension, AggregatorSpec, GroupByQuery, QueryType};
pub use server::{create_router, run_server, AppState, ServerConfig};
