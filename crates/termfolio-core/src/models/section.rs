//! Portfolio content sections

use serde::{Deserialize, Serialize};

/// A content panel that can be opened over the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    /// Background and focus
    About,
    /// Work history
    Experience,
    /// Skills and certifications
    Skills,
    /// Tools and research
    Projects,
    /// Blog index or the loaded post
    Blog,
    /// Ways to get in touch
    Contact,
}

impl Section {
    /// Every section, in display order
    pub const ALL: [Section; 6] = [
        Self::About,
        Self::Experience,
        Self::Skills,
        Self::Projects,
        Self::Blog,
        Self::Contact,
    ];

    /// Stable identifier (`about-content`, ...)
    pub fn id(self) -> &'static str {
        match self {
            Self::About => "about-content",
            Self::Experience => "experience-content",
            Self::Skills => "skills-content",
            Self::Projects => "projects-content",
            Self::Blog => "blog-content",
            Self::Contact => "contact-content",
        }
    }

    /// The `*.txt` name printed while opening
    pub fn file_name(self) -> &'static str {
        match self {
            Self::About => "about.txt",
            Self::Experience => "experience.txt",
            Self::Skills => "skills.txt",
            Self::Projects => "projects.txt",
            Self::Blog => "blog.md",
            Self::Contact => "contact.txt",
        }
    }

    /// Panel title
    pub fn title(self) -> &'static str {
        match self {
            Self::About => "About Me",
            Self::Experience => "Experience",
            Self::Skills => "Skills & Certifications",
            Self::Projects => "Projects",
            Self::Blog => "Blog",
            Self::Contact => "Contact",
        }
    }
}
