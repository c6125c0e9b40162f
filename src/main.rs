use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::*;
use serde::Serialize;

use crate::models::certificate::Certificate;
use crate::models::profile::UserProfile;
use crate::models::project::Project;
use crate::models::skill::Skill;
use crate::models::store::{Collection, Store};
use crate::services::auth::{AuthError, AuthSession, LoginDraft, SignupDraft};
use crate::services::form::{FormController, Notification, SubmitError};
use crate::services::lookup;
use crate::validation::FileHandle;
use crate::views::View;

mod charts;
mod models;
mod services;
mod ui;
mod validation;
mod views;

#[derive(Parser)]
#[command(
    name = "skillvault",
    about = "Track your skills, projects and certificates for one session",
    no_binary_name = true,
    disable_version_flag = true
)]
struct Shell {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sign in with your email and password
    Login {
        #[arg(short, long, default_value = "")]
        email: String,

        #[arg(short, long, default_value = "")]
        password: String,
    },

    /// Create an account (step one of two)
    Signup {
        /// Full name
        #[arg(long, default_value = "")]
        name: String,

        #[arg(long, default_value = "")]
        email: String,

        #[arg(long, default_value = "")]
        password: String,

        /// Repeat the password
        #[arg(long, default_value = "")]
        confirm: String,

        #[arg(long, default_value = "")]
        age: String,

        /// Phone number
        #[arg(long, default_value = "")]
        phone: String,

        /// undergraduate, graduate, postgraduate or phd
        #[arg(long, default_value = "")]
        status: String,
    },

    /// Enter the verification code to finish signup
    Verify { code: String },

    /// Sign out
    Logout,

    /// Open a page (home, skills, projects, certificates, progress)
    Go { page: String },

    /// Show your profile
    Profile,

    /// Manage skills
    #[command(subcommand)]
    Skill(SkillCommands),

    /// Manage projects
    #[command(subcommand)]
    Project(ProjectCommands),

    /// Manage certificates
    #[command(subcommand)]
    Cert(CertCommands),

    /// Print the portfolio as JSON (display only, nothing is saved)
    Export,

    /// Leave the session; everything in it is discarded
    Quit,
}

#[derive(Subcommand)]
enum SkillCommands {
    /// Add a new skill
    Add {
        /// Skill name, e.g. "React.js"
        name: Option<String>,

        /// Beginner, Intermediate or Advanced
        #[arg(short, long, default_value = "")]
        level: String,

        #[arg(short, long, default_value = "")]
        description: String,
    },

    /// Edit a skill, matched by slug or name
    Edit {
        reference: String,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        level: Option<String>,

        #[arg(short, long)]
        description: Option<String>,
    },

    /// Delete a skill
    Delete { reference: String },

    /// List all skills
    List,
}

#[derive(Subcommand)]
enum ProjectCommands {
    /// Add a new project
    Add {
        /// Project title
        title: Option<String>,

        /// Main technology or stack
        #[arg(short, long, default_value = "")]
        technology: String,

        /// Link to the live project or repository
        #[arg(short, long, default_value = "")]
        url: String,

        #[arg(short, long, default_value = "")]
        description: String,

        /// How long it took, free form
        #[arg(long, default_value = "")]
        duration: String,
    },

    /// Edit a project, matched by slug or title
    Edit {
        reference: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(short, long)]
        technology: Option<String>,

        #[arg(short, long)]
        url: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(long)]
        duration: Option<String>,
    },

    /// Delete a project
    Delete { reference: String },

    /// List all projects
    List,
}

#[derive(Subcommand)]
enum CertCommands {
    /// Add a new certificate
    Add {
        /// Certificate title
        title: Option<String>,

        #[arg(short, long, default_value = "")]
        issuer: String,

        /// Issue date (YYYY-MM-DD)
        #[arg(short, long, default_value = "")]
        date: String,

        /// Public link to the credential
        #[arg(short, long, default_value = "")]
        link: String,

        /// Path to a PDF or image of the certificate; only its name,
        /// type and size are looked at
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Edit a certificate, matched by slug or title
    Edit {
        reference: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(short, long)]
        issuer: Option<String>,

        #[arg(short, long)]
        date: Option<String>,

        #[arg(short, long)]
        link: Option<String>,

        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Delete a certificate
    Delete { reference: String },

    /// List all certificates
    List,
}

/// Everything one interactive session owns.
struct App {
    store: Store,
    auth: AuthSession,
    view: View,
    skill_form: FormController<Skill>,
    project_form: FormController<Project>,
    certificate_form: FormController<Certificate>,
}

impl App {
    fn new() -> Self {
        Self {
            store: Store::new(),
            auth: AuthSession::new(),
            view: View::Home,
            skill_form: FormController::new(),
            project_form: FormController::new(),
            certificate_form: FormController::new(),
        }
    }
}

enum Flow {
    Continue,
    Quit,
}

fn main() {
    let mut app = App::new();
    ui::render_banner();
    render_view(&app);

    let mut line = String::new();
    loop {
        let prompt = match app.auth.user() {
            Some(user) => format!("{}:{}>", user.email, app.view.title().to_lowercase()),
            None if app.auth.is_awaiting_verification() => "verify>".to_string(),
            None => "guest>".to_string(),
        };
        print!("{} ", prompt.cyan());
        let _ = io::stdout().flush();

        line.clear();
        match io::stdin().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                eprintln!("Error: failed to read input: {e}");
                break;
            }
        }

        let tokens = tokenize(&line);
        if tokens.is_empty() {
            continue;
        }

        let shell = match Shell::try_parse_from(&tokens) {
            Ok(shell) => shell,
            Err(err) => {
                let _ = err.print();
                continue;
            }
        };

        match dispatch(&mut app, shell.command) {
            Flow::Quit => break,
            Flow::Continue => {}
        }
    }

    println!("Session ended. Nothing was saved anywhere.");
}

fn dispatch(app: &mut App, command: Command) -> Flow {
    match command {
        Command::Login { email, password } => handle_login(app, email, password),
        Command::Signup {
            name,
            email,
            password,
            confirm,
            age,
            phone,
            status,
        } => handle_signup(app, name, email, password, confirm, age, phone, status),
        Command::Verify { code } => handle_verify(app, &code),
        Command::Logout => {
            app.auth.logout();
            app.view = View::Home;
            println!("Signed out.");
            render_view(app);
        }
        Command::Go { page } => handle_go(app, &page),
        Command::Profile => {
            if let Some(user) = app.auth.user() {
                ui::render_profile(user);
            } else {
                sign_in_hint();
            }
        }
        Command::Skill(command) => {
            if signed_in(app) {
                handle_skill(app, command);
            }
        }
        Command::Project(command) => {
            if signed_in(app) {
                handle_project(app, command);
            }
        }
        Command::Cert(command) => {
            if signed_in(app) {
                handle_certificate(app, command);
            }
        }
        Command::Export => {
            if signed_in(app) {
                handle_export(app);
            }
        }
        Command::Quit => return Flow::Quit,
    }
    Flow::Continue
}

fn signed_in(app: &App) -> bool {
    if app.auth.is_logged_in() {
        return true;
    }
    sign_in_hint();
    false
}

fn sign_in_hint() {
    println!(
        "{}",
        "Sign in first: `login --email you@example.com --password ...`".yellow()
    );
}

fn handle_login(app: &mut App, email: String, password: String) {
    if app.auth.is_logged_in() {
        println!("Already signed in. Use `logout` to switch accounts.");
        return;
    }
    let draft = LoginDraft { email, password };
    match app.auth.login(&draft) {
        Ok(()) => {
            ui::render_notification(&Notification::success("Welcome back to SkillVault"));
            app.view = View::Home;
            render_view(app);
        }
        Err(AuthError::Rejected(errors)) => ui::render_field_errors(&errors),
        Err(err) => eprintln!("Error: {err}"),
    }
}

#[allow(clippy::too_many_arguments)]
fn handle_signup(
    app: &mut App,
    name: String,
    email: String,
    password: String,
    confirm: String,
    age: String,
    phone: String,
    status: String,
) {
    if app.auth.is_logged_in() {
        println!("Already signed in. Use `logout` to switch accounts.");
        return;
    }
    let draft = SignupDraft {
        full_name: name,
        email,
        password,
        confirm_password: confirm,
        age,
        phone_number: phone,
        graduation_status: status,
    };
    match app.auth.signup(&draft) {
        Ok(()) => {
            let email = app.auth.pending_email().unwrap_or_default().to_string();
            ui::render_notification(&Notification::success(format!(
                "Verification code sent to {email}"
            )));
            println!("  {}", "Finish with `verify <6-digit code>`.".dimmed());
        }
        Err(AuthError::Rejected(errors)) => ui::render_field_errors(&errors),
        Err(err) => eprintln!("Error: {err}"),
    }
}

fn handle_verify(app: &mut App, code: &str) {
    match app.auth.verify(code) {
        Ok(()) => {
            ui::render_notification(&Notification::success("Welcome to SkillVault"));
            app.view = View::Home;
            render_view(app);
        }
        Err(AuthError::Rejected(errors)) => ui::render_field_errors(&errors),
        Err(err) => eprintln!("Error: {err}"),
    }
}

fn handle_go(app: &mut App, page: &str) {
    match page.parse::<View>() {
        Ok(view) => {
            app.view = view;
            render_view(app);
        }
        Err(err) => eprintln!("Error: {err}"),
    }
}

fn handle_skill(app: &mut App, command: SkillCommands) {
    match command {
        SkillCommands::Add {
            name,
            level,
            description,
        } => {
            if app.skill_form.is_editing() {
                app.skill_form.cancel();
            }
            let draft = app.skill_form.draft_mut();
            draft.name = name.unwrap_or_default();
            draft.level = level;
            draft.description = description;
            submit_skill(app);
        }
        SkillCommands::Edit {
            reference,
            name,
            level,
            description,
        } => {
            let id = match lookup::resolve(&app.store.skills, &reference) {
                Ok(id) => id,
                Err(err) => {
                    eprintln!("Error: {err}");
                    return;
                }
            };
            if let Err(err) = app.skill_form.start_edit(&app.store.skills, id) {
                eprintln!("Error: {err}");
                return;
            }
            let draft = app.skill_form.draft_mut();
            if let Some(name) = name {
                draft.name = name;
            }
            if let Some(level) = level {
                draft.level = level;
            }
            if let Some(description) = description {
                draft.description = description;
            }
            submit_skill(app);
        }
        SkillCommands::Delete { reference } => match lookup::resolve(&app.store.skills, &reference)
        {
            Ok(id) => {
                let notification = match app.store.skills.remove(id) {
                    Some(_) => Notification::success("Skill deleted successfully"),
                    None => Notification::error("Skill was already removed"),
                };
                ui::render_notification(&notification);
            }
            Err(err) => eprintln!("Error: {err}"),
        },
        SkillCommands::List => render_skills_page(app),
    }
}

fn submit_skill(app: &mut App) {
    match app.skill_form.submit(&mut app.store.skills) {
        Ok(notification) => ui::render_notification(&notification),
        Err(SubmitError::Rejected(errors)) => {
            ui::render_field_errors(&errors);
            app.skill_form.cancel();
        }
        Err(err) => eprintln!("Error: {err}"),
    }
}

fn handle_project(app: &mut App, command: ProjectCommands) {
    match command {
        ProjectCommands::Add {
            title,
            technology,
            url,
            description,
            duration,
        } => {
            if app.project_form.is_editing() {
                app.project_form.cancel();
            }
            let draft = app.project_form.draft_mut();
            draft.title = title.unwrap_or_default();
            draft.technology = technology;
            draft.url = url;
            draft.description = description;
            draft.duration = duration;
            submit_project(app);
        }
        ProjectCommands::Edit {
            reference,
            title,
            technology,
            url,
            description,
            duration,
        } => {
            let id = match lookup::resolve(&app.store.projects, &reference) {
                Ok(id) => id,
                Err(err) => {
                    eprintln!("Error: {err}");
                    return;
                }
            };
            if let Err(err) = app.project_form.start_edit(&app.store.projects, id) {
                eprintln!("Error: {err}");
                return;
            }
            let draft = app.project_form.draft_mut();
            if let Some(title) = title {
                draft.title = title;
            }
            if let Some(technology) = technology {
                draft.technology = technology;
            }
            if let Some(url) = url {
                draft.url = url;
            }
            if let Some(description) = description {
                draft.description = description;
            }
            if let Some(duration) = duration {
                draft.duration = duration;
            }
            submit_project(app);
        }
        ProjectCommands::Delete { reference } => {
            match lookup::resolve(&app.store.projects, &reference) {
                Ok(id) => {
                    let notification = match app.store.projects.remove(id) {
                        Some(_) => Notification::success("Project deleted successfully"),
                        None => Notification::error("Project was already removed"),
                    };
                    ui::render_notification(&notification);
                }
                Err(err) => eprintln!("Error: {err}"),
            }
        }
        ProjectCommands::List => render_projects_page(app),
    }
}

fn submit_project(app: &mut App) {
    match app.project_form.submit(&mut app.store.projects) {
        Ok(notification) => ui::render_notification(&notification),
        Err(SubmitError::Rejected(errors)) => {
            ui::render_field_errors(&errors);
            app.project_form.cancel();
        }
        Err(err) => eprintln!("Error: {err}"),
    }
}

fn handle_certificate(app: &mut App, command: CertCommands) {
    match command {
        CertCommands::Add {
            title,
            issuer,
            date,
            link,
            file,
        } => {
            if app.certificate_form.is_editing() {
                app.certificate_form.cancel();
            }
            let handle = match file.as_deref().map(file_handle).transpose() {
                Ok(handle) => handle,
                Err(message) => {
                    eprintln!("Error: {message}");
                    return;
                }
            };
            let draft = app.certificate_form.draft_mut();
            draft.title = title.unwrap_or_default();
            draft.issuer = issuer;
            draft.issue_date = date;
            draft.certificate_link = link;
            draft.file = handle;
            submit_certificate(app);
        }
        CertCommands::Edit {
            reference,
            title,
            issuer,
            date,
            link,
            file,
        } => {
            let id = match lookup::resolve(&app.store.certificates, &reference) {
                Ok(id) => id,
                Err(err) => {
                    eprintln!("Error: {err}");
                    return;
                }
            };
            let handle = match file.as_deref().map(file_handle).transpose() {
                Ok(handle) => handle,
                Err(message) => {
                    eprintln!("Error: {message}");
                    return;
                }
            };
            if let Err(err) = app
                .certificate_form
                .start_edit(&app.store.certificates, id)
            {
                eprintln!("Error: {err}");
                return;
            }
            let draft = app.certificate_form.draft_mut();
            if let Some(title) = title {
                draft.title = title;
            }
            if let Some(issuer) = issuer {
                draft.issuer = issuer;
            }
            if let Some(date) = date {
                draft.issue_date = date;
            }
            if let Some(link) = link {
                draft.certificate_link = link;
            }
            if handle.is_some() {
                draft.file = handle;
            }
            submit_certificate(app);
        }
        CertCommands::Delete { reference } => {
            match lookup::resolve(&app.store.certificates, &reference) {
                Ok(id) => {
                    let notification = match app.store.certificates.remove(id) {
                        Some(_) => Notification::success("Certificate deleted successfully"),
                        None => Notification::error("Certificate was already removed"),
                    };
                    ui::render_notification(&notification);
                }
                Err(err) => eprintln!("Error: {err}"),
            }
        }
        CertCommands::List => render_certificates_page(app),
    }
}

fn submit_certificate(app: &mut App) {
    match app.certificate_form.submit(&mut app.store.certificates) {
        Ok(notification) => ui::render_notification(&notification),
        Err(SubmitError::Rejected(errors)) => {
            ui::render_field_errors(&errors);
            app.certificate_form.cancel();
        }
        Err(err) => eprintln!("Error: {err}"),
    }
}

/// Build the metadata-only handle the validator looks at. The file's
/// bytes are never read.
fn file_handle(path: &Path) -> Result<FileHandle, String> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| format!("Cannot read '{}': {e}", path.display()))?;
    let name = match path.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => path.display().to_string(),
    };
    Ok(FileHandle {
        content_type: content_type_for(&name),
        name,
        size: metadata.len(),
    })
}

/// Mirror of what a browser file picker would report for the file.
fn content_type_for(name: &str) -> String {
    let extension = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);
    match extension.as_deref() {
        Some("pdf") => "application/pdf",
        Some("jpeg") => "image/jpeg",
        Some("jpg") => "image/jpg",
        Some("png") => "image/png",
        _ => "application/octet-stream",
    }
    .to_string()
}

fn handle_export(app: &App) {
    #[derive(Serialize)]
    struct ExportPayload<'a> {
        user: &'a UserProfile,
        skills: &'a Collection<Skill>,
        projects: &'a Collection<Project>,
        certificates: &'a Collection<Certificate>,
    }

    let Some(user) = app.auth.user() else { return };
    let payload = ExportPayload {
        user,
        skills: &app.store.skills,
        projects: &app.store.projects,
        certificates: &app.store.certificates,
    };
    match serde_json::to_string_pretty(&payload) {
        Ok(json) => println!("{json}"),
        Err(err) => eprintln!("Error: failed to render portfolio as JSON: {err}"),
    }
}

fn render_view(app: &App) {
    if !app.auth.is_logged_in() {
        render_landing();
        return;
    }
    match app.view {
        View::Home => render_dashboard(app),
        View::Skills => render_skills_page(app),
        View::Projects => render_projects_page(app),
        View::Certificates => render_certificates_page(app),
        View::Progress => render_progress_page(app),
    }
}

fn render_landing() {
    println!("  {}", "Welcome to SkillVault".bold());
    println!(
        "  {}",
        "Track skills, manage projects, earn certifications and monitor"
    );
    println!(
        "  {}",
        "your learning progress. Build your future, one skill at a time."
    );
    println!();
    println!(
        "  {}",
        "`login --email ... --password ...` or `signup --help` to get started".dimmed()
    );
    println!();
}

fn render_dashboard(app: &App) {
    let Some(user) = app.auth.user() else { return };
    ui::render_section_header(&format!("Welcome back, {}", user.name));
    println!(
        "    {}  {}",
        app.store.skills.len().to_string().bold(),
        "Skills".dimmed()
    );
    println!(
        "    {}  {}",
        app.store.projects.len().to_string().bold(),
        "Projects".dimmed()
    );
    println!(
        "    {}  {}",
        app.store.certificates.len().to_string().bold(),
        "Certificates".dimmed()
    );
    println!();
    ui::render_academic_progress(user);
    println!(
        "  {}",
        "Pages: `go skills`, `go projects`, `go certificates`, `go progress`".dimmed()
    );
}

fn render_skills_page(app: &App) {
    let skills = &app.store.skills;
    ui::render_view_header("Your Skills", skills.len(), "skill");
    if skills.is_empty() {
        ui::render_empty(
            "No skills added yet. Start with `skill add <name> --level ... --description ...`.",
        );
        return;
    }
    for skill in skills {
        ui::render_skill(skill);
    }
}

fn render_projects_page(app: &App) {
    let projects = &app.store.projects;
    ui::render_view_header("My Projects", projects.len(), "project");
    if projects.is_empty() {
        ui::render_empty(
            "No projects yet. Start with `project add <title> --technology ... --description ...`.",
        );
        return;
    }
    for project in projects {
        ui::render_project(project);
    }
}

fn render_certificates_page(app: &App) {
    let certificates = &app.store.certificates;
    ui::render_view_header("My Certificates", certificates.len(), "certificate");
    if certificates.is_empty() {
        ui::render_empty(
            "No certificates yet. Start with `cert add <title> --issuer ... --date YYYY-MM-DD`.",
        );
        return;
    }
    for certificate in certificates {
        ui::render_certificate(certificate);
    }
}

fn render_progress_page(app: &App) {
    let Some(user) = app.auth.user() else { return };
    ui::render_section_header("Academic Progress");
    ui::render_academic_progress(user);
    ui::render_section_header("Skill Distribution");
    ui::render_distribution(&charts::SKILL_DISTRIBUTION);
    ui::render_section_header("Progress by Category");
    ui::render_category_counts(&charts::CATEGORY_COUNTS);
}

/// Split a command line into tokens, honoring single and double
/// quotes so titles and descriptions can contain spaces.
fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut has_token = false;

    for ch in line.chars() {
        match quote {
            Some(q) if ch == q => quote = None,
            Some(_) => current.push(ch),
            None => match ch {
                '"' | '\'' => {
                    quote = Some(ch);
                    has_token = true;
                }
                c if c.is_whitespace() => {
                    if has_token {
                        tokens.push(std::mem::take(&mut current));
                        has_token = false;
                    }
                }
                c => {
                    current.push(c);
                    has_token = true;
                }
            },
        }
    }
    if has_token {
        tokens.push(current);
    }
    tokens
}
