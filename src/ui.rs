use colored::*;
use jiff::civil::Date;

use crate::charts::{CategoryCounts, DistributionSlice};
use crate::models::certificate::Certificate;
use crate::models::profile::UserProfile;
use crate::models::project::Project;
use crate::models::skill::{Skill, SkillLevel};
use crate::services::form::{Notification, NotificationKind};
use crate::validation::FieldErrors;

/// Get the terminal width, defaulting to 80 if unavailable
fn terminal_width() -> usize {
    term_size::dimensions().map(|(w, _)| w).unwrap_or(80)
}

pub fn render_banner() {
    println!();
    println!("  {}", "SkillVault".cyan().bold());
    println!(
        "  {}",
        "Your skills, projects and certificates in one place".dimmed()
    );
    println!(
        "  {}",
        "Type `help` for commands. Nothing leaves this session.".dimmed()
    );
    println!();
}

/// Render a view header with title and count
pub fn render_view_header(title: &str, count: usize, noun: &str) {
    let noun = if count == 1 {
        noun.to_string()
    } else {
        format!("{noun}s")
    };
    println!("\n  {} ({} {})\n", title.cyan().bold(), count, noun);
}

/// Render a section header (e.g., "Skill Distribution")
pub fn render_section_header(title: &str) {
    println!("\n  ─── {} ───\n", title.bold());
}

pub fn render_empty(hint: &str) {
    println!("  {}", hint.dimmed());
}

pub fn render_notification(notification: &Notification) {
    match notification.kind {
        NotificationKind::Success => {
            println!("{} {}", "✓".green(), notification.message);
        }
        NotificationKind::Error => match &notification.field {
            Some(field) => eprintln!(
                "{} {} {}",
                "✗".red(),
                notification.message,
                format!("({field})").dimmed()
            ),
            None => eprintln!("{} {}", "✗".red(), notification.message),
        },
    }
}

pub fn render_field_errors(errors: &FieldErrors) {
    eprintln!("{} {}", "✗".red(), "Please fix the following:".red());
    for (field, message) in errors.iter() {
        eprintln!("    {} {}", format!("{field}:").bold(), message);
    }
}

fn level_badge(level: SkillLevel) -> ColoredString {
    match level {
        SkillLevel::Beginner => level.as_str().blue(),
        SkillLevel::Intermediate => level.as_str().yellow(),
        SkillLevel::Advanced => level.as_str().green(),
    }
}

/// Render a skill card with the added-on date right-aligned when the
/// terminal is wide enough.
pub fn render_skill(skill: &Skill) {
    let heading = format!("  {} {}  {}", "•".green(), skill.name.bold(), level_badge(skill.level));
    let heading_visible = format!("  • {}  {}", skill.name, skill.level.as_str())
        .chars()
        .count();
    let added = format!("Added on {}", format_long_date(skill.date_added));

    let width = terminal_width();
    if heading_visible + added.chars().count() + 4 < width {
        let padding = width - heading_visible - added.chars().count() - 2;
        println!("{}{}{}", heading, " ".repeat(padding), added.dimmed());
    } else {
        println!("{heading}");
        println!("    {}", added.dimmed());
    }
    println!("    {}", skill.description);
    println!("    {}", "─".repeat(30).dimmed());
    println!();
}

pub fn render_project(project: &Project) {
    println!(
        "  {} {}  {}",
        "•".green(),
        project.title.bold(),
        project.technology.cyan()
    );
    println!("    {}", project.description);
    if let Some(url) = &project.url {
        println!("    {}", url.as_str().blue().underline());
    }
    if let Some(duration) = &project.duration {
        println!("    {}", format!("Duration: {duration}").dimmed());
    }
    println!("    {}", "─".repeat(30).dimmed());
    println!();
}

pub fn render_certificate(certificate: &Certificate) {
    println!(
        "  {} {}  {}",
        "•".green(),
        certificate.title.bold(),
        certificate.issuer.blue()
    );
    println!(
        "    {}",
        format!("Earned: {}", format_long_date(certificate.issue_date)).dimmed()
    );
    if let Some(link) = &certificate.certificate_link {
        println!("    {}", link.as_str().blue().underline());
    }
    if let Some(file_name) = &certificate.file_name {
        println!("    {}", format!("Attachment: {file_name}").dimmed());
    }
    println!("    {}", "─".repeat(30).dimmed());
    println!();
}

pub fn render_profile(user: &UserProfile) {
    render_section_header(&user.name);
    println!("    {} {}", "Email:".dimmed(), user.email);
    println!("    {} {}", "Major:".dimmed(), user.major);
    println!("    {} {}", "Year:".dimmed(), user.year);
    println!("    {} {:.1}", "GPA:".dimmed(), user.gpa);
    println!(
        "    {} {} of {}",
        "Credits:".dimmed(),
        user.completed_credits,
        user.required_credits
    );
    println!();
}

/// GPA, credits and the progress-to-graduation meter
pub fn render_academic_progress(user: &UserProfile) {
    let percent = user.graduation_progress();
    println!(
        "    {}  {}",
        format!("{:.1}", user.gpa).cyan().bold(),
        "Current GPA".dimmed()
    );
    println!(
        "    {}  {}",
        user.completed_credits.to_string().magenta().bold(),
        "Credits Completed".dimmed()
    );
    println!(
        "    {}  {}",
        format!("{percent}%").green().bold(),
        "Progress to Graduation".dimmed()
    );
    println!();
    println!("    {}", meter(percent as usize, 100, bar_width()));
    println!();
}

pub fn render_distribution(slices: &[DistributionSlice]) {
    for slice in slices {
        println!(
            "    {:<14} {} {}",
            slice.category,
            meter(usize::from(slice.percent), 100, 30),
            format!("{}%", slice.percent).dimmed()
        );
    }
    println!();
}

pub fn render_category_counts(rows: &[CategoryCounts]) {
    let max = rows
        .iter()
        .flat_map(|r| [r.skills, r.projects, r.certificates])
        .max()
        .unwrap_or(1)
        .max(1);
    for row in rows {
        println!("    {}", row.category.bold());
        count_line("Skills", row.skills, max, Color::Cyan);
        count_line("Projects", row.projects, max, Color::Yellow);
        count_line("Certificates", row.certificates, max, Color::Green);
        println!();
    }
}

fn count_line(label: &str, count: u8, max: u8, color: Color) {
    let width = 24usize;
    let filled = (usize::from(count) * width + usize::from(max) / 2) / usize::from(max);
    let filled = filled.min(width);
    println!(
        "      {:<13} {}{} {}",
        label.dimmed(),
        "█".repeat(filled).color(color),
        "░".repeat(width - filled).dimmed(),
        count.to_string().dimmed()
    );
}

fn bar_width() -> usize {
    terminal_width().saturating_sub(12).clamp(20, 48)
}

fn meter(value: usize, max: usize, width: usize) -> String {
    let filled = if max == 0 {
        0
    } else {
        (value * width + max / 2) / max
    };
    let filled = filled.min(width);
    format!(
        "{}{}",
        "█".repeat(filled).cyan(),
        "░".repeat(width - filled).dimmed()
    )
}

/// Format a date the way the web app did, e.g. "January 15, 2024"
pub fn format_long_date(date: Date) -> String {
    date.strftime("%B %d, %Y").to_string()
}
