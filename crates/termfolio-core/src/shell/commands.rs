//! The command table

use chrono::{DateTime, Local};

use crate::config::TerminalConfig;
use crate::content::{self, blog, BlogPost};
use crate::models::{OutputLine, Section};

/// Side effect a command asks the UI to perform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Open a content section after the configured delay
    OpenSection(Section),
    /// Load a blog post and show it in the blog section
    LoadBlog(&'static BlogPost),
    /// Wipe the output
    Clear,
    /// Quit after the configured delay
    Exit,
}

/// What a handler produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Lines appended to the output
    pub lines: Vec<OutputLine>,
    /// Optional follow-up
    pub action: Option<Action>,
}

impl CommandOutput {
    fn lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(|l| OutputLine::Text(l.into())).collect(),
            action: None,
        }
    }

    fn with_action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }
}

/// Inputs a handler may read besides its arguments
pub struct Context<'a> {
    /// Prompt identity
    pub terminal: &'a TerminalConfig,
    /// Wall clock for `date`
    pub now: DateTime<Local>,
}

/// Handler signature
pub type Handler = fn(&Context<'_>, &[String]) -> CommandOutput;

/// One row of the command table
#[derive(Clone, Copy)]
pub struct Command {
    /// Name typed by the user
    pub name: &'static str,
    /// Shown by `help`
    pub description: &'static str,
    /// Set when this row only exists as another spelling
    pub alias_of: Option<&'static str>,
    /// Implementation
    pub handler: Handler,
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("alias_of", &self.alias_of)
            .finish()
    }
}

const fn command(name: &'static str, description: &'static str, handler: Handler) -> Command {
    Command {
        name,
        description,
        alias_of: None,
        handler,
    }
}

/// Every command, in `help` order
pub const COMMANDS: &[Command] = &[
    command("help", "Show this list", help),
    command("about", "About me and my background", about),
    command("experience", "Work experience and timeline", experience),
    command("skills", "Technical skills and certifications", skills),
    command("projects", "Security tools and research projects", projects),
    command("blog", "Security articles and writeups", blog),
    Command {
        name: "blogs",
        description: "Security articles and writeups",
        alias_of: Some("blog"),
        handler: blog,
    },
    command("profiles", "Security researcher profiles", profiles),
    command("reviews", "Security review portfolios", reviews),
    command("contact", "Get in touch", contact),
    command("clear", "Clear terminal", clear),
    command("exit", "Close terminal", exit),
    command("whoami", "Show current user", whoami),
    command("ls", "List files", ls),
    command("cat", "Display file contents", cat),
    command("pwd", "Print working directory", pwd),
    command("date", "Show current date", date),
    command("neofetch", "System information", neofetch),
];

/// Exact-name lookup
pub fn lookup(name: &str) -> Option<&'static Command> {
    COMMANDS.iter().find(|c| c.name == name)
}

/// Response for names missing from the table
pub fn not_found(name: &str) -> CommandOutput {
    CommandOutput::lines([format!(
        "Command not found: {name}. Type 'help' for available commands."
    )])
}

/// Prefix the items of a listing with tree glyphs
fn tree<'a, T>(items: &'a [T]) -> impl Iterator<Item = (&'static str, &'a T)> + 'a {
    let last = items.len().saturating_sub(1);
    items
        .iter()
        .enumerate()
        .map(move |(i, item)| (if i == last { "└── " } else { "├── " }, item))
}

fn help(_: &Context<'_>, _: &[String]) -> CommandOutput {
    let listed: Vec<&Command> = COMMANDS
        .iter()
        .filter(|c| c.alias_of.is_none() && c.name != "help")
        .collect();

    let mut output = CommandOutput::lines(["Available commands:"]);
    output.lines.extend(
        tree(&listed).map(|(glyph, c)| OutputLine::Text(format!("{glyph}{} - {}", c.name, c.description))),
    );
    output
}

fn open(section: Section) -> CommandOutput {
    CommandOutput::lines([format!("Opening {}...", section.file_name())])
        .with_action(Action::OpenSection(section))
}

fn about(_: &Context<'_>, _: &[String]) -> CommandOutput {
    open(Section::About)
}

fn experience(_: &Context<'_>, _: &[String]) -> CommandOutput {
    open(Section::Experience)
}

fn skills(_: &Context<'_>, _: &[String]) -> CommandOutput {
    open(Section::Skills)
}

fn projects(_: &Context<'_>, _: &[String]) -> CommandOutput {
    open(Section::Projects)
}

fn contact(_: &Context<'_>, _: &[String]) -> CommandOutput {
    open(Section::Contact)
}

fn blog(_: &Context<'_>, args: &[String]) -> CommandOutput {
    let slug = match args.first().map(String::as_str) {
        None | Some("list") => {
            let mut output = CommandOutput::lines(["Available blog posts:"]);
            output.lines.extend(blog::POSTS.iter().map(|post| OutputLine::BlogLink {
                prefix: "├── ".to_string(),
                slug: post.slug.to_string(),
                title: post.title.to_string(),
            }));
            output
                .lines
                .push(OutputLine::text("Type blog <slug> to read a post."));
            return output;
        }
        Some(slug) => slug,
    };

    match blog::find(slug) {
        Some(post) => CommandOutput::lines([format!("Opening blog: {}...", post.title)])
            .with_action(Action::LoadBlog(post)),
        None => CommandOutput::lines([format!("No blog post found for slug: {slug}")]),
    }
}

fn links(heading: &str, entries: &[content::LinkEntry]) -> CommandOutput {
    let mut output = CommandOutput::lines([heading]);
    output.lines.extend(
        tree(entries).map(|(glyph, (label, url))| OutputLine::link(glyph, *label, *url)),
    );
    output
}

fn profiles(_: &Context<'_>, _: &[String]) -> CommandOutput {
    links("My Security Researcher Profiles:", &content::PROFILES)
}

fn reviews(_: &Context<'_>, _: &[String]) -> CommandOutput {
    links("My Security Review Portfolios:", &content::REVIEWS)
}

fn clear(_: &Context<'_>, _: &[String]) -> CommandOutput {
    CommandOutput::default().with_action(Action::Clear)
}

fn exit(_: &Context<'_>, _: &[String]) -> CommandOutput {
    CommandOutput::lines(["Goodbye! Closing terminal..."]).with_action(Action::Exit)
}

fn whoami(_: &Context<'_>, _: &[String]) -> CommandOutput {
    CommandOutput::lines([content::WHOAMI])
}

fn ls(ctx: &Context<'_>, args: &[String]) -> CommandOutput {
    let long = args.iter().any(|a| a == "-la" || a == "-a");
    if !long {
        let names: Vec<&str> = content::FILES.iter().map(|f| f.name).collect();
        return CommandOutput::lines([names.join("  ")]);
    }

    let user = &ctx.terminal.user;
    let mut lines = vec![
        "total 8".to_string(),
        format!("drwxr-xr-x  2 {user} {user} 4096 Dec 15 10:30 ."),
        format!("drwxr-xr-x  3 {user} {user} 4096 Dec 15 10:30 .."),
    ];
    lines.extend(content::FILES.iter().map(|f| {
        format!("-rw-r--r--  1 {user} {user} {:>4} Dec 15 10:30 {}", f.size, f.name)
    }));
    CommandOutput::lines(lines)
}

fn cat(_: &Context<'_>, args: &[String]) -> CommandOutput {
    let Some(file) = args.first() else {
        return CommandOutput::lines(["Usage: cat [filename]"]);
    };

    match content::find_file(file) {
        Some(f) => CommandOutput::lines(f.summary.iter().copied()),
        None => CommandOutput::lines([format!("cat: {file}: No such file or directory")]),
    }
}

fn pwd(ctx: &Context<'_>, _: &[String]) -> CommandOutput {
    CommandOutput::lines([ctx.terminal.home_dir()])
}

/// `M/D/YYYY h:mm:ss AM`
pub fn format_date(now: &DateTime<Local>) -> String {
    now.format("%-m/%-d/%Y %-I:%M:%S %p").to_string()
}

fn date(ctx: &Context<'_>, _: &[String]) -> CommandOutput {
    CommandOutput::lines([format_date(&ctx.now)])
}

fn neofetch(_: &Context<'_>, _: &[String]) -> CommandOutput {
    CommandOutput::lines(content::NEOFETCH)
}
