use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "lakescraper", about = "Template-driven B2B web scraping platform")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Submit a scrape job for a single domain and run it to completion
    Submit {
        /// Target domain (min length 3)
        #[arg(short, long)]
        domain: String,

        /// Template id; "auto" (or any unknown id) lets the job runner detect the
        /// platform from the homepage and pick a template from the registry
        #[arg(short, long, default_value = "auto")]
        template_id: String,

        /// Maximum pages to discover on the domain
        #[arg(short, long, default_value = "100")]
        max_pages: i32,

        /// Data types to extract (comma-separated: blog_url,article,contact,tech_stack,resource,pricing)
        #[arg(long, value_delimiter = ',', default_value = "blog_url,article")]
        data_types: Vec<String>,
    },
    /// Run a discovery query, fanning out into one scrape job per surviving domain
    Discover {
        /// Search query
        #[arg(short, long)]
        query: String,

        /// Number of result pages to pull from the search provider
        #[arg(short, long, default_value = "3")]
        search_pages: u32,

        /// Data types to extract for each discovered domain
        #[arg(long, value_delimiter = ',', default_value = "blog_url,article")]
        data_types: Vec<String>,

        /// Template id applied to every discovered domain
        #[arg(short, long, default_value = "auto")]
        template_id: String,

        /// Maximum pages to discover per domain
        #[arg(long, default_value = "50")]
        max_pages_per_domain: i32,
    },
    /// Run the scheduler and tracked-search tick loops (daemon mode)
    Run {
        /// Maximum number of scrape jobs running concurrently
        #[arg(long, default_value = "10")]
        max_concurrent_jobs: usize,
    },
    /// Show job and domain tracking status
    Status {
        /// Limit the number of recent jobs listed
        #[arg(short, long, default_value = "20")]
        limit: i64,
    },
}
