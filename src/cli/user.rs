//! User account CLI commands.

use crate::cli::common::{print_json, CliContext, CliError, CliResult, Credentials};
use crate::constants::ACTIVITIES;
use crate::services::{NewUser, ProfileUpdate, UserStore};
use clap::{Args, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// User account commands
#[derive(Args, Debug)]
pub struct UserArgs {
    #[command(subcommand)]
    command: UserCommand,
}

#[derive(Subcommand, Debug)]
enum UserCommand {
    /// Create an account
    Register(RegisterArgs),
    /// Show a user's public profile
    Show(ShowArgs),
    /// Update your profile
    Update(UpdateArgs),
    /// Delete your account and the lists you created
    Delete(DeleteArgs),
    /// List all usernames
    List(ListUsersArgs),
    /// List the activities that can be selected
    Activities,
}

/// Create an account
#[derive(Args, Debug)]
pub struct RegisterArgs {
    #[command(flatten)]
    credentials: Credentials,

    /// Activity you enjoy (repeatable, at least one)
    #[arg(long = "activity", value_name = "ACTIVITY")]
    activities: Vec<String>,

    /// Short bio
    #[arg(long, default_value = "")]
    bio: String,

    /// Profile picture to copy into the data directory
    #[arg(long, value_name = "FILE")]
    image: Option<PathBuf>,
}

/// Show a user's public profile
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Username
    name: String,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Update your profile
#[derive(Args, Debug)]
pub struct UpdateArgs {
    #[command(flatten)]
    credentials: Credentials,

    /// New username
    #[arg(long, value_name = "NAME")]
    new_username: Option<String>,

    /// New password
    #[arg(long, value_name = "PASSWORD")]
    new_password: Option<String>,

    /// New bio
    #[arg(long)]
    bio: Option<String>,

    /// New profile picture
    #[arg(long, value_name = "FILE")]
    image: Option<PathBuf>,

    /// Replace activities (repeatable)
    #[arg(long = "activity", value_name = "ACTIVITY")]
    activities: Vec<String>,
}

/// Delete your account
#[derive(Args, Debug)]
pub struct DeleteArgs {
    #[command(flatten)]
    credentials: Credentials,
}

/// List all usernames
#[derive(Args, Debug)]
pub struct ListUsersArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct ProfileOutput<'a> {
    username: &'a str,
    bio: &'a str,
    activities: &'a [String],
    profile_image: Option<&'a Path>,
    created_lists: Vec<&'a str>,
    liked_lists: Vec<&'a str>,
    saved_lists: Vec<&'a str>,
}

impl UserArgs {
    /// Execute user subcommand
    pub fn execute(&self, ctx: &CliContext) -> CliResult<()> {
        match &self.command {
            UserCommand::Register(args) => args.execute(ctx),
            UserCommand::Show(args) => args.execute(ctx),
            UserCommand::Update(args) => args.execute(ctx),
            UserCommand::Delete(args) => args.execute(ctx),
            UserCommand::List(args) => args.execute(ctx),
            UserCommand::Activities => {
                for activity in ACTIVITIES {
                    println!("{activity}");
                }
                Ok(())
            }
        }
    }
}

impl RegisterArgs {
    /// Execute register command
    pub fn execute(&self, ctx: &CliContext) -> CliResult<()> {
        let mut store = ctx.open_store()?;

        let profile_image = match &self.image {
            Some(path) => Some(import_image(&store, path)?),
            None => None,
        };

        let session = store.register(NewUser {
            username: self.credentials.user.clone(),
            password: self.credentials.password.clone(),
            activities: self.activities.clone(),
            bio: self.bio.clone(),
            profile_image,
        })?;
        CliContext::save_store(&store)?;

        println!("Registered user '{}'", session.username());
        Ok(())
    }
}

impl ShowArgs {
    /// Execute show command
    pub fn execute(&self, ctx: &CliContext) -> CliResult<()> {
        let store = ctx.open_store()?;
        let record = store
            .profile(&self.name)
            .ok_or_else(|| CliError::io(format!("User '{}' not found", self.name)))?;

        let output = ProfileOutput {
            username: &record.username,
            bio: &record.bio,
            activities: &record.activities,
            profile_image: record.profile_image.as_deref(),
            created_lists: record.created_lists.keys().map(String::as_str).collect(),
            liked_lists: record.liked_list_names().collect(),
            saved_lists: record.saved_lists.keys().map(String::as_str).collect(),
        };

        if self.json {
            return print_json(&output);
        }

        println!("User: {}", output.username);
        if !output.bio.is_empty() {
            println!("Bio: {}", output.bio);
        }
        println!("Activities: {}", output.activities.join(", "));
        if let Some(image) = output.profile_image {
            println!("Profile picture: {}", image.display());
        }
        println!("Created lists: {}", join_or_none(&output.created_lists));
        println!("Liked lists: {}", join_or_none(&output.liked_lists));
        println!("Saved lists: {}", join_or_none(&output.saved_lists));

        Ok(())
    }
}

impl UpdateArgs {
    /// Execute update command
    pub fn execute(&self, ctx: &CliContext) -> CliResult<()> {
        let mut store = ctx.open_store()?;
        let session = self.credentials.login(&store)?;

        let profile_image = match &self.image {
            Some(path) => Some(import_image(&store, path)?),
            None => None,
        };

        let update = ProfileUpdate {
            username: self.new_username.clone(),
            password: self.new_password.clone(),
            bio: self.bio.clone(),
            profile_image,
            activities: (!self.activities.is_empty()).then(|| self.activities.clone()),
        };

        let session = store.update_profile(&session, update)?;
        CliContext::save_store(&store)?;

        println!("Profile updated for '{}'", session.username());
        Ok(())
    }
}

impl DeleteArgs {
    /// Execute delete command
    pub fn execute(&self, ctx: &CliContext) -> CliResult<()> {
        let mut store = ctx.open_store()?;
        let session = self.credentials.login(&store)?;

        let record = store.delete_user(&session)?;
        CliContext::save_store(&store)?;

        println!(
            "Deleted user '{}' and {} list(s)",
            record.username,
            record.created_lists.len()
        );
        Ok(())
    }
}

impl ListUsersArgs {
    /// Execute list command
    pub fn execute(&self, ctx: &CliContext) -> CliResult<()> {
        let store = ctx.open_store()?;
        let usernames = store.usernames();

        if self.json {
            return print_json(&usernames);
        }

        if usernames.is_empty() {
            println!("No users registered");
        }
        for name in usernames {
            println!("{name}");
        }
        Ok(())
    }
}

fn import_image(store: &UserStore, path: &Path) -> CliResult<PathBuf> {
    if !path.exists() {
        return Err(CliError::io(format!(
            "Image file not found: {}",
            path.display()
        )));
    }
    store
        .import_profile_image(path)
        .map_err(|e| CliError::io(format!("{e:#}")))
}

fn join_or_none(names: &[&str]) -> String {
    if names.is_empty() {
        "(none)".to_string()
    } else {
        names.join(", ")
    }
}
