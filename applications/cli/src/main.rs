//! Gigs - command-line client for the gigs marketplace

mod config;
mod edit;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use config::GigsConfig;
use edit::Edit;
use gigs_client::{
    ArtistDetail, EditorSession, FileSessionStore, GigsClient, NewUser, SessionContext,
};
use gigs_core::{AccountId, ArtistSchema, HostSchema, NoticeKind, ProfileSchema, Role};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "gigs")]
#[command(about = "Gigs marketplace command-line client", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account
    Register {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
        /// host or performer
        #[arg(short, long)]
        role: Role,
    },
    /// Sign in and remember the session
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the signed-in account
    Whoami,
    /// View or edit your profile
    Profile {
        #[command(subcommand)]
        command: ProfileCommand,
    },
    /// Browse the artist directory
    Artists {
        #[command(subcommand)]
        command: ArtistsCommand,
    },
    /// Manage users (admin accounts only)
    Admin {
        #[command(subcommand)]
        command: AdminCommand,
    },
}

#[derive(Subcommand)]
enum ProfileCommand {
    /// Print the current profile
    Show,
    /// Change fields and media, then save
    Edit(EditArgs),
}

#[derive(Subcommand)]
enum ArtistsCommand {
    /// List artists
    List {
        /// Filter by name, category, location or price
        query: Option<String>,
    },
    /// Show one artist in full
    Show { id: String },
}

#[derive(Args)]
struct EditArgs {
    /// Set a text or numeric field
    #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = edit::parse_assignment)]
    set: Vec<(String, String)>,

    /// Add an entry to a list field
    #[arg(long = "add", value_name = "FIELD=VALUE", value_parser = edit::parse_assignment)]
    add: Vec<(String, String)>,

    /// Remove an entry from a list field
    #[arg(long = "remove", value_name = "FIELD=VALUE", value_parser = edit::parse_assignment)]
    remove: Vec<(String, String)>,

    /// Flip a yes/no field
    #[arg(long = "toggle", value_name = "FIELD")]
    toggle: Vec<String>,

    /// Remove a gallery image by its position
    #[arg(long = "remove-gallery", value_name = "INDEX")]
    remove_gallery: Vec<usize>,

    /// New profile picture
    #[arg(long)]
    avatar: Option<PathBuf>,

    /// Gallery images to upload
    #[arg(long = "gallery", value_name = "PATH")]
    gallery: Vec<PathBuf>,
}

impl EditArgs {
    /// Field edits in command-line order, gallery removals last and
    /// highest index first so earlier removals do not shift later ones.
    fn edits(&self) -> Vec<Edit> {
        let mut removals = self.remove_gallery.clone();
        removals.sort_unstable_by(|a, b| b.cmp(a));
        removals.dedup();

        let pair = |(field, value): &(String, String)| (field.clone(), value.clone());
        let set = self.set.iter().map(pair).map(|(field, value)| Edit::Set { field, value });
        let add = self.add.iter().map(pair).map(|(field, value)| Edit::AddTag { field, value });
        let remove = self
            .remove
            .iter()
            .map(pair)
            .map(|(field, value)| Edit::RemoveTag { field, value });

        set.chain(add)
            .chain(remove)
            .chain(self.toggle.iter().cloned().map(Edit::Toggle))
            .chain(removals.into_iter().map(Edit::RemoveGallery))
            .collect()
    }
}

#[derive(Subcommand)]
enum AdminCommand {
    /// List users
    Users {
        /// Filter by username, email or role
        #[arg(short, long)]
        filter: Option<String>,
    },
    /// Create a user
    AddUser {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
        #[arg(short, long)]
        role: Role,
    },
    /// Delete a user
    DeleteUser { id: AccountId },
}

/// Everything a command needs
struct App {
    config: GigsConfig,
    client: GigsClient,
    session: SessionContext,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gigs=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = GigsConfig::load(cli.config.as_deref())?;
    config.validate()?;

    let client = GigsClient::new(config.client_config())?;
    let store = Arc::new(FileSessionStore::new(config.session.path.clone()));
    let session = SessionContext::restore(store).await;
    let app = App {
        config,
        client,
        session,
    };

    match cli.command {
        Commands::Register {
            email,
            username,
            password,
            role,
        } => register(&app, &email, &username, &password, role).await?,
        Commands::Login { email, password } => login(&app, &email, &password).await?,
        Commands::Logout => {
            app.session.logout().await?;
            println!("Signed out");
        }
        Commands::Whoami => whoami(&app).await,
        Commands::Profile { command } => profile(app, command).await?,
        Commands::Artists { command } => artists(&app, command).await?,
        Commands::Admin { command } => admin(&app, command).await?,
    }

    Ok(())
}

async fn register(
    app: &App,
    email: &str,
    username: &str,
    password: &str,
    role: Role,
) -> anyhow::Result<()> {
    if role == Role::Admin {
        bail!("Admin accounts can only be created by an administrator");
    }

    let message = app
        .client
        .auth()
        .register(email, password, username, role)
        .await?;
    println!(
        "{}",
        message.unwrap_or_else(|| "Registration successful".to_string())
    );
    Ok(())
}

async fn login(app: &App, email: &str, password: &str) -> anyhow::Result<()> {
    let account = app
        .session
        .login(&app.client.auth(), email, password)
        .await?;
    println!(
        "Signed in as {} ({})",
        account.username.as_deref().unwrap_or(&account.email),
        account.role
    );
    Ok(())
}

async fn whoami(app: &App) {
    match app.session.account().await {
        Some(account) => {
            println!("id        {}", account.id);
            println!("email     {}", account.email);
            println!("username  {}", account.username.unwrap_or_default());
            println!("role      {}", account.role);
        }
        None => println!("Not signed in"),
    }
}

async fn profile(app: App, command: ProfileCommand) -> anyhow::Result<()> {
    let role = app.session.credential().await?.account.role;
    match role {
        Role::Performer => run_profile::<ArtistSchema>(app, command).await,
        Role::Host => run_profile::<HostSchema>(app, command).await,
        Role::Admin => bail!("Admin accounts have no profile"),
    }
}

async fn run_profile<S: ProfileSchema>(app: App, command: ProfileCommand) -> anyhow::Result<()> {
    let editor_config = app.config.editor_config();
    let mut editing = EditorSession::<S>::open(app.client, app.session, editor_config).await?;

    if editing.editor().current().is_none() {
        let message = editing
            .editor()
            .notice(NoticeKind::Error, Instant::now())
            .map(|n| n.message.clone())
            .unwrap_or_else(|| format!("Failed to fetch {} profile.", S::KIND));
        bail!(message);
    }

    match command {
        ProfileCommand::Show => {
            print_notices(&editing);
            if let Some(profile) = editing.editor().current() {
                println!("{}", edit::render(profile));
            }
        }
        ProfileCommand::Edit(args) => {
            if !editing.editor().is_editing() {
                editing.begin_edit().await?;
            }
            for change in args.edits() {
                edit::apply(editing.editor_mut(), &change)
                    .with_context(|| format!("Could not apply {change:?}"))?;
            }
            if let Some(path) = &args.avatar {
                editing.stage_avatar_path(path).await?;
            }
            if !args.gallery.is_empty() {
                let results = editing.stage_gallery_paths(&args.gallery).await?;
                for (path, result) in args.gallery.iter().zip(results) {
                    if let Err(e) = result {
                        eprintln!("Skipped {}: {}", path.display(), e);
                    }
                }
            }

            editing.save().await?;
            print_notices(&editing);
            if let Some(profile) = editing.editor().current() {
                println!("{}", edit::render(profile));
            }
        }
    }
    Ok(())
}

fn print_notices<S: ProfileSchema>(editing: &EditorSession<S>) {
    for notice in editing.editor().visible_notices(Instant::now()) {
        match notice.kind {
            NoticeKind::Error => eprintln!("{}", notice.message),
            _ => println!("{}", notice.message),
        }
    }
}

async fn artists(app: &App, command: ArtistsCommand) -> anyhow::Result<()> {
    let directory = app.client.directory().list_artists().await?;

    match command {
        ArtistsCommand::List { query } => {
            let cards = directory.search(query.as_deref().unwrap_or_default());
            if cards.is_empty() {
                println!("No artists found");
                return Ok(());
            }
            for card in cards {
                println!(
                    "{:<6} {:<28} {:<18} {:<16} {:>4.1} ({:>3})  {}",
                    card.id,
                    card.name,
                    card.category,
                    card.location,
                    card.rating,
                    card.review_count,
                    card.price
                );
            }
        }
        ArtistsCommand::Show { id } => match directory.get(&id) {
            Some(artist) => println!("{}", render_artist(artist)),
            None => bail!("Artist details could not be loaded."),
        },
    }
    Ok(())
}

fn render_artist(artist: &ArtistDetail) -> String {
    let yes_no = |flag: bool| if flag { "Yes" } else { "No" };
    let card = &artist.card;
    let mut lines = vec![
        card.name.clone(),
        format!("{} from {}", card.category, card.location),
        format!("Rating {:.1} ({} reviews)", card.rating, card.review_count),
        format!("Price           {}", card.price),
        format!("Full name       {}", artist.full_name),
        format!("Bio             {}", artist.bio),
        format!("Skills          {}", artist.skills.join(", ")),
        format!("Contact         {}", artist.contact_number),
        format!("Direct booking  {}", yes_no(artist.direct_booking)),
        format!(
            "Travel distance {} km",
            gigs_core::loose::format_number(artist.travel_distance)
        ),
        format!(
            "Availability    weekdays {}, weekends {}, morning {}, evening {}",
            yes_no(artist.availability_weekdays),
            yes_no(artist.availability_weekends),
            yes_no(artist.availability_morning),
            yes_no(artist.availability_evening)
        ),
        format!("Picture         {}", card.image),
    ];
    lines.extend(artist.gallery.iter().map(|url| format!("Gallery         {url}")));
    lines.join("\n")
}

async fn admin(app: &App, command: AdminCommand) -> anyhow::Result<()> {
    let credential = app.session.credential().await?;
    let admin = app.client.admin(&credential)?;

    match command {
        AdminCommand::Users { filter } => {
            let users = admin.list_users().await?;
            let filter = filter.unwrap_or_default();
            for user in users.iter().filter(|u| u.matches(&filter)) {
                println!(
                    "{:<6} {:<20} {:<32} {:<10} {}",
                    user.id,
                    user.username,
                    user.email,
                    user.role.as_str(),
                    user.status.as_deref().unwrap_or("active")
                );
            }
        }
        AdminCommand::AddUser {
            username,
            email,
            password,
            role,
        } => {
            let user = NewUser {
                username,
                email,
                password,
                role,
            };
            let message = admin.add_user(&user).await?;
            println!(
                "{}",
                message.unwrap_or_else(|| "User added successfully!".to_string())
            );
        }
        AdminCommand::DeleteUser { id } => {
            let message = admin.delete_user(id).await?;
            println!(
                "{}",
                message.unwrap_or_else(|| "User deleted successfully!".to_string())
            );
        }
    }
    Ok(())
}
