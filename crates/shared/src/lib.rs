// Public modules
pub mod aggregator;
pub mod config;
pub mod curator;
pub mod guardian;
pub mod models;
pub mod readings;
pub mod readwise;
pub mod render;
pub mod verse;
pub mod weather;

// Re-export commonly used types
pub use aggregator::Sources;
pub use config::{Config, CurationLimits, InterestProfile};
pub use curator::NewsCurator;
pub use guardian::GuardianClient;
pub use models::{
    ArticleSummary, DailyContent, DailyVerse, Fetch, Highlight, NewsItem, ReadingPlanEntry, Tier,
    WeatherSnapshot,
};
pub use readings::reading_plan;
pub use readwise::ReadwiseClient;
pub use render::render_pdf;
pub use verse::daily_verse;
pub use weather::WeatherClient;
