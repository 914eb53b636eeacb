//! Blogdesk CLI
//!
//! Terminal front end for the category and blog console:
//! - Sign in and out
//! - List, search, add, rename, and delete categories
//! - List blogs
//!
//! Every subcommand drives the same view model the browser screens mirror.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use blogdesk::{
    ApiClient, BlogListView, Category, CategoryFormView, CategoryListState, CategoryListView,
    Config, ConsoleApi, LoggingConfig, LoginView, Route, SessionContext,
};

#[derive(Parser)]
#[command(name = "blogdesk")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Admin console for apikeeda categories and blogs")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search the usual locations)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and store the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "BLOGDESK_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Clear the stored session
    Logout,

    /// Show the stored session
    Whoami,

    /// Manage categories
    Categories {
        #[command(subcommand)]
        command: CategoryCommands,
    },

    /// Browse blogs
    Blogs {
        #[command(subcommand)]
        command: BlogCommands,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List categories
    List {
        /// Only categories whose name matches
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Search interactively: one search box value per stdin line
    Watch,
    /// Add a category
    Add { name: String },
    /// Show one category
    Show { id: String },
    /// Rename a category
    Rename { id: String, name: String },
    /// Delete a category
    Delete { id: String },
}

#[derive(Subcommand)]
pub enum BlogCommands {
    /// List your blogs
    List,
}

struct Console {
    api: Arc<dyn ConsoleApi>,
    session: SessionContext,
    config: Config,
    format: OutputFormat,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::Config { output } = &cli.command {
        let config = blogdesk::config::generate_default_config();
        match output {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(path, &config)?;
                println!("Config written to {:?}", path);
            }
            None => print!("{}", config),
        }
        return Ok(());
    }

    let config = Config::load_default(cli.config.as_deref()).context("Failed to load config")?;
    init_logging(&config.logging);

    let api = ApiClient::new(config.service.clone()).context("Failed to build HTTP client")?;
    tracing::debug!(base_url = %api.config().base(), "Client ready");
    let console = Console {
        api: Arc::new(api),
        session: SessionContext::file(&config.session.path),
        config,
        format: cli.format,
    };

    match cli.command {
        Commands::Login { email, password } => console.login(email, password).await,
        Commands::Logout => console.logout(),
        Commands::Whoami => console.whoami(),
        Commands::Categories { command } => match command {
            CategoryCommands::List { search } => console.list_categories(search).await,
            CategoryCommands::Watch => console.watch_categories().await,
            CategoryCommands::Add { name } => console.add_category(name).await,
            CategoryCommands::Show { id } => console.show_category(id).await,
            CategoryCommands::Rename { id, name } => console.rename_category(id, name).await,
            CategoryCommands::Delete { id } => console.delete_category(id).await,
        },
        Commands::Blogs {
            command: BlogCommands::List,
        } => console.list_blogs().await,
        Commands::Config { .. } => Ok(()),
    }
}

fn init_logging(config: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(format!("blogdesk={}", config.level)));

    let registry = tracing_subscriber::registry().with(filter);
    if config.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

/// Fail when a view asked to navigate to the login screen
fn ensure_signed_in(redirect: Option<&Route>) -> anyhow::Result<()> {
    if redirect == Some(&Route::Login) {
        bail!("Not signed in. Run `blogdesk login` first.");
    }
    Ok(())
}

impl Console {
    async fn login(&self, email: String, password: String) -> anyhow::Result<()> {
        let mut view = LoginView::new(Arc::clone(&self.api), self.session.clone());
        view.email = email;
        view.password = password;

        if view.submit().await.is_none() {
            bail!("{}", view.error().unwrap_or("Login failed"));
        }

        let auth_id = self.session.auth_id()?.unwrap_or_default();
        println!("Signed in ({})", auth_id);
        Ok(())
    }

    fn logout(&self) -> anyhow::Result<()> {
        self.session.clear()?;
        println!("Signed out");
        Ok(())
    }

    fn whoami(&self) -> anyhow::Result<()> {
        let signed_in = self.session.token()?.is_some();
        let auth_id = self.session.auth_id()?;
        let user = self
            .session
            .login_response()?
            .and_then(|raw| serde_json::from_str::<serde_json::Value>(&raw).ok())
            .map(|body| body["data"].clone())
            .unwrap_or(serde_json::Value::Null);

        match self.format {
            OutputFormat::Json => {
                let body = serde_json::json!({
                    "signed_in": signed_in,
                    "auth_id": auth_id,
                    "user": user,
                });
                println!("{}", serde_json::to_string_pretty(&body)?);
            }
            OutputFormat::Table => {
                if !signed_in {
                    println!("Not signed in");
                    return Ok(());
                }
                println!("Auth ID: {}", auth_id.as_deref().unwrap_or("-"));
                if let Some(name) = user["name"].as_str() {
                    println!("Name:    {}", name);
                }
                if let Some(email) = user["email"].as_str() {
                    println!("Email:   {}", email);
                }
            }
        }
        Ok(())
    }

    fn category_list(&self) -> CategoryListView {
        CategoryListView::new(
            Arc::clone(&self.api),
            self.session.clone(),
            self.config.console.clone(),
        )
    }

    fn category_form(&self, id: Option<String>) -> CategoryFormView {
        let policy = self.config.console.on_missing_token;
        match id {
            Some(id) => CategoryFormView::edit(Arc::clone(&self.api), self.session.clone(), policy, id),
            None => CategoryFormView::create(Arc::clone(&self.api), self.session.clone(), policy),
        }
    }

    async fn list_categories(&self, search: Option<String>) -> anyhow::Result<()> {
        let mut view = self.category_list();
        match search.as_deref() {
            Some(term) => view.search(term.trim()).await,
            None => view.load().await,
        }

        let state = view.snapshot();
        ensure_signed_in(state.redirect.as_ref())?;
        if let Some(error) = &state.error {
            bail!("{}", error);
        }
        self.print_categories(&state.categories)
    }

    async fn watch_categories(&self) -> anyhow::Result<()> {
        let mut view = self.category_list();
        let mut rx = view.subscribe();

        view.load().await;
        let state = rx.borrow_and_update().clone();
        ensure_signed_in(state.redirect.as_ref())?;
        let mut shown = ShownListing::default();
        shown.update(&state);
        self.render_list(&state)?;

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            tokio::select! {
                line = lines.next_line() => match line? {
                    Some(line) => view.on_search_input(line.trim()).await,
                    None => break,
                },
                changed = rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let state = rx.borrow_and_update().clone();
                    if !view.search_pending() && shown.update(&state) {
                        self.render_list(&state)?;
                    }
                }
            }
        }

        view.flush_search().await;
        let state = rx.borrow_and_update().clone();
        if shown.update(&state) {
            self.render_list(&state)?;
        }
        Ok(())
    }

    fn render_list(&self, state: &CategoryListState) -> anyhow::Result<()> {
        if self.format == OutputFormat::Table {
            if state.search_term.is_empty() {
                println!("-- all categories --");
            } else {
                println!("-- search: {} --", state.search_term);
            }
        }
        if let Some(error) = &state.error {
            eprintln!("Error: {}", error);
        }
        self.print_categories(&state.categories)
    }

    fn print_categories(&self, categories: &[Category]) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(categories)?),
            OutputFormat::Table => {
                if categories.is_empty() {
                    println!("No categories found");
                    return Ok(());
                }
                println!("{:<26} {}", "ID", "Name");
                println!("{}", "-".repeat(50));
                for category in categories {
                    println!("{:<26} {}", category.id, category.name);
                }
            }
        }
        Ok(())
    }

    async fn add_category(&self, name: String) -> anyhow::Result<()> {
        let mut form = self.category_form(None);
        form.set_name(name);
        self.submit_form(form).await
    }

    async fn rename_category(&self, id: String, name: String) -> anyhow::Result<()> {
        let mut form = self.category_form(Some(id));
        form.load().await;
        ensure_signed_in(form.redirect())?;
        if let Some(error) = form.error() {
            bail!("{}", error);
        }
        form.set_name(name);
        self.submit_form(form).await
    }

    async fn submit_form(&self, mut form: CategoryFormView) -> anyhow::Result<()> {
        let done = form.submit().await;
        ensure_signed_in(form.redirect())?;
        if done.is_none() {
            bail!("{}", form.error().unwrap_or("Failed to save category"));
        }
        println!("{}: saved \"{}\"", form.title(), form.name());
        Ok(())
    }

    async fn show_category(&self, id: String) -> anyhow::Result<()> {
        let mut form = self.category_form(Some(id.clone()));
        form.load().await;
        ensure_signed_in(form.redirect())?;
        if let Some(error) = form.error() {
            bail!("{}", error);
        }

        let category = Category {
            id,
            name: form.name().to_string(),
        };
        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&category)?),
            OutputFormat::Table => {
                println!("ID:   {}", category.id);
                println!("Name: {}", category.name);
            }
        }
        Ok(())
    }

    async fn delete_category(&self, id: String) -> anyhow::Result<()> {
        let view = self.category_list();
        let deleted = view.delete(&id).await;

        let state = view.snapshot();
        ensure_signed_in(state.redirect.as_ref())?;
        if !deleted {
            bail!(
                "{}",
                state.error.as_deref().unwrap_or("Failed to delete category")
            );
        }
        println!("Deleted {}", id);
        Ok(())
    }

    async fn list_blogs(&self) -> anyhow::Result<()> {
        let mut view = BlogListView::new(
            Arc::clone(&self.api),
            self.session.clone(),
            self.config.console.on_missing_token,
        );
        view.load().await;

        let state = view.state();
        ensure_signed_in(state.redirect.as_ref())?;
        if let Some(error) = &state.error {
            bail!("{}", error);
        }

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&state.blogs)?),
            OutputFormat::Table => {
                if state.blogs.is_empty() {
                    println!("No blogs found");
                    return Ok(());
                }
                println!("{:<26} {:<30} {:<20} {}", "ID", "Title", "Category", "Detail");
                println!("{}", "-".repeat(100));
                for blog in &state.blogs {
                    let category = blog.category.as_ref().map(|c| c.label()).unwrap_or("-");
                    println!(
                        "{:<26} {:<30} {:<20} {}",
                        blog.id,
                        truncate(&blog.title, 30),
                        truncate(category, 20),
                        blog.detail_path()
                    );
                }
            }
        }
        Ok(())
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}

/// Listing last printed by `categories watch`
#[derive(Default)]
struct ShownListing(Option<(Vec<Category>, Option<String>)>);

impl ShownListing {
    /// Record a settled state, returning true when its categories or error
    /// differ from what was last printed
    fn update(&mut self, state: &CategoryListState) -> bool {
        if state.loading {
            return false;
        }
        let listing = (state.categories.clone(), state.error.clone());
        if self.0.as_ref() == Some(&listing) {
            return false;
        }
        self.0 = Some(listing);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(names: &[&str], term: &str) -> CategoryListState {
        CategoryListState {
            categories: names
                .iter()
                .map(|name| Category {
                    id: format!("id-{}", name),
                    name: name.to_string(),
                })
                .collect(),
            search_term: term.to_string(),
            error: None,
            loading: false,
            redirect: None,
        }
    }

    #[test]
    fn test_typing_alone_does_not_reprint() {
        let mut shown = ShownListing::default();
        assert!(shown.update(&state(&["Go", "Rust"], "")));

        assert!(!shown.update(&state(&["Go", "Rust"], "R")));
        assert!(!shown.update(&state(&["Go", "Rust"], "Ru")));
        assert!(shown.update(&state(&["Rust"], "Ru")));
    }

    #[test]
    fn test_loading_and_errors() {
        let mut shown = ShownListing::default();
        let mut loading = state(&[], "");
        loading.loading = true;
        assert!(!shown.update(&loading));

        assert!(shown.update(&state(&["Rust"], "")));
        let mut failed = state(&["Rust"], "");
        failed.error = Some("Failed to delete category".to_string());
        assert!(shown.update(&failed));
        assert!(!shown.update(&failed));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a longer category name", 10), "a longe...");
    }
}
