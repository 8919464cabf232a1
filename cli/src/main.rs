use clap::{Parser, Subcommand};
use lessonhub::Config;
use lessonhub::auth::{self, UserClaims};
use lessonhub::model::entity::{
    Lesson, LessonCreate, Module, ModuleCreate, UserEntity, UserEntityCreate,
};
use lessonhub::model::{DatabaseError, ModelManager, Repository, ResourceType};
use lessonhub::web::UserRole;

#[derive(Parser, Debug)]
#[command(about = "CLI tool for seeding the lessonhub DB", long_about = None)]
pub struct Cli {
    /// Read ./config.toml instead of the user config directory
    #[arg(long, global = true)]
    pub local: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage users
    User {
        #[command(subcommand)]
        action: UserCommands,
    },

    /// Manage lessons
    Lesson {
        #[command(subcommand)]
        action: LessonCommands,
    },

    /// Manage modules
    Module {
        #[command(subcommand)]
        action: ModuleCommands,
    },
}

/// User management
#[derive(Subcommand, Debug)]
pub enum UserCommands {
    Add {
        #[arg(long)]
        username: String,
        #[arg(long, default_value = "user")]
        role: String,
    },
    /// Print a bearer token for an existing user
    Token {
        #[arg(long)]
        username: String,
        #[arg(long, default_value_t = 24)]
        hours: i64,
    },
}

/// Lesson management
#[derive(Subcommand, Debug)]
pub enum LessonCommands {
    Add {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
    },
}

/// Module management
#[derive(Subcommand, Debug)]
pub enum ModuleCommands {
    Add {
        /// Lesson title to attach the module to
        #[arg(long)]
        lesson_title: String,
        #[arg(long)]
        title: String,
    },
}

#[tokio::main]
async fn main() -> lessonhub::error::AppResult<()> {
    let _ = dotenvy::dotenv();
    let args = Cli::parse();

    let config = Config::load(args.local)?;
    let db_con = lessonhub::connect_database(&config).await?;
    let mm = ModelManager::new(db_con);
    let mut conn = mm.acquire().await?;

    match args.command {
        Commands::User { action } => match action {
            UserCommands::Add { username, role } => {
                let user = UserEntity::create(
                    &mut conn,
                    UserEntityCreate {
                        username,
                        role: UserRole::from(role.as_str()),
                    },
                )
                .await?;
                println!("User created: {:?}", user);
            }

            UserCommands::Token { username, hours } => {
                let user = UserEntity::find_by_username(&mut conn, &username)
                    .await?
                    .ok_or(DatabaseError::NotFound(ResourceType::User))?;

                let claims = UserClaims::new(user.id(), chrono::Duration::hours(hours));
                let token = auth::generate_token(claims, config.app().jwt())
                    .map_err(auth::CryptError::from)?;
                println!("{token}");
            }
        },

        Commands::Lesson { action } => match action {
            LessonCommands::Add { title, description } => {
                let lesson = Lesson::create(&mut conn, LessonCreate { title, description }).await?;
                println!("Lesson created: {:?}", lesson);
            }
        },

        Commands::Module { action } => match action {
            ModuleCommands::Add { lesson_title, title } => {
                let lesson = Lesson::find_by_title(&mut conn, &lesson_title)
                    .await?
                    .ok_or(DatabaseError::NotFound(ResourceType::Lesson))?;

                let (module, lesson) =
                    Module::create_in_lesson(&mm, ModuleCreate::with_placeholder(lesson.id(), title))
                        .await?;
                println!(
                    "Module created: {:?} ({} modules in lesson)",
                    module,
                    lesson.modules().len()
                );
            }
        },
    }

    Ok(())
}
