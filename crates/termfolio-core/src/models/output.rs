//! Lines written to the terminal output

use serde::Serialize;

/// One line of terminal output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OutputLine {
    /// Echo of an executed command behind the prompt
    Command {
        /// `user@host:~$`
        prompt: String,
        /// Normalized command line
        command: String,
    },
    /// Plain response text
    Text(String),
    /// External link, e.g. a researcher profile
    Link {
        /// Tree glyph or other text before the label
        prefix: String,
        /// Visible label
        label: String,
        /// Target URL
        url: String,
    },
    /// Link to a blog post, activated with `blog <slug>`
    BlogLink {
        /// Tree glyph before the title
        prefix: String,
        /// Post slug
        slug: String,
        /// Post title
        title: String,
    },
}

impl OutputLine {
    /// Plain response text
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// External link with a leading prefix
    pub fn link(prefix: impl Into<String>, label: impl Into<String>, url: impl Into<String>) -> Self {
        Self::Link {
            prefix: prefix.into(),
            label: label.into(),
            url: url.into(),
        }
    }

    /// Render without styling, as `termfolio exec` prints it
    pub fn plain(&self) -> String {
        match self {
            Self::Command { prompt, command } => format!("{prompt} {command}"),
            Self::Text(text) => text.clone(),
            Self::Link { prefix, label, url } => format!("{prefix}{label} <{url}>"),
            Self::BlogLink { prefix, slug, title } => format!("{prefix}{title} ({slug})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_rendering() {
        let echo = OutputLine::Command {
            prompt: "kenzo@whitehat:~$".to_string(),
            command: "ls -la".to_string(),
        };
        assert_eq!(echo.plain(), "kenzo@whitehat:~$ ls -la");

        let link = OutputLine::link("├── ", "Cantina", "https://cantina.xyz/");
        assert_eq!(link.plain(), "├── Cantina <https://cantina.xyz/>");

        let post = OutputLine::BlogLink {
            prefix: "├── ".to_string(),
            slug: "hello-world".to_string(),
            title: "Hello World".to_string(),
        };
        assert_eq!(post.plain(), "├── Hello World (hello-world)");
    }
}
