pub mod card;
pub mod config;
pub mod feed;
pub mod feed_source;
pub mod http_client;
pub mod lazy_load;
pub mod leaderboard;
pub mod match_list;
pub mod provider;
pub mod scoring;
pub mod state;
pub mod theme;
