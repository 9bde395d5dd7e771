use clap::Parser;
use quizweb::{db::Db, game::PlayStore, AppState};

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// SQLite database URL, e.g. sqlite:quizweb.db
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite:quizweb.db")]
    database_url: String,

    /// The address to bind to.
    #[arg(short, long, env, default_value = "127.0.0.1:3000")]
    address: String,

    /// Mark cookies Secure (enable behind HTTPS).
    #[arg(long, env = "SECURE_COOKIES", default_value_t = false)]
    secure_cookies: bool,

    /// Create an "admin" user with this password if it does not exist yet.
    #[arg(long, env = "SEED_ADMIN_PASSWORD")]
    seed_admin_password: Option<String>,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let filter =
        std::env::var("RUST_LOG").unwrap_or_else(|_| "tracing=info,quizweb=debug".to_owned());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
        .init();

    let args = Args::parse();

    let db = Db::new(&args.database_url).await?;

    if let Some(password) = &args.seed_admin_password {
        db.seed_admin("admin", password).await?;
    }

    let state = AppState {
        db,
        plays: PlayStore::default(),
        secure_cookies: args.secure_cookies,
    };
    let routes = quizweb::router(state);

    let listener = tokio::net::TcpListener::bind(&args.address).await?;
    tracing::info!("listening on {}", args.address);
    axum::serve(listener, routes).await?;

    Ok(())
}
