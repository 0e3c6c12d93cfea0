//! Static portfolio content
//!
//! Everything the interpreter can reveal lives here: section bodies (as
//! markdown), the fake file listing, `cat` summaries, neofetch and the
//! profile links.

pub mod blog;
pub mod markdown;

use crate::models::Section;

pub use blog::{BlogPost, POSTS};

/// `whoami` response
pub const WHOAMI: &str =
    "Offensive Blockchain Security Researcher | Smart Contract Auditor | DeFi Security Expert";

/// A file in the fake home directory
#[derive(Debug, Clone, Copy)]
pub struct FakeFile {
    /// File name
    pub name: &'static str,
    /// Size shown by `ls -la`
    pub size: u32,
    /// Lines printed by `cat`
    pub summary: &'static [&'static str],
}

/// Files listed by `ls`, in listing order
pub const FILES: [FakeFile; 4] = [
    FakeFile {
        name: "about.txt",
        size: 256,
        summary: &[
            "Blockchain Offensive Security Researcher",
            "Specialized in smart contract auditing and DeFi security",
            "Type \"about\" to view full profile",
        ],
    },
    FakeFile {
        name: "experience.txt",
        size: 512,
        summary: &[
            "Senior Blockchain Security Researcher (2022-Present)",
            "Penetration Tester (2020-2022)",
            "Security Analyst (2018-2020)",
            "Type \"experience\" to view detailed timeline",
        ],
    },
    FakeFile {
        name: "projects.txt",
        size: 384,
        summary: &[
            "Smart Contract Vulnerability Scanner",
            "MEV Bot Detection System",
            "Cross-Chain Bridge Security Framework",
            "Type \"projects\" to view detailed projects",
        ],
    },
    FakeFile {
        name: "contact.txt",
        size: 128,
        summary: &[
            "Email: your.email@example.com",
            "Twitter: @YourTwitterHandle",
            "GitHub: github.com/YourUsername",
            "Type \"contact\" to view full contact info",
        ],
    },
];

/// Look up a file by exact name
pub fn find_file(name: &str) -> Option<&'static FakeFile> {
    FILES.iter().find(|f| f.name == name)
}

/// `neofetch` block (the first two lines are centred over the rest)
pub const NEOFETCH: [&str; 10] = [
    "                    kenzo@whitehat",
    "                   -------------------",
    "OS: Blockchain Security Researcher",
    "Kernel: Smart Contract Auditor",
    "Shell: DeFi Security Expert",
    "Terminal: Offensive Security",
    "CPU: Solidity, Vyper, Python",
    "Memory: 50+ Smart Contract Audits",
    "Disk: 100+ Penetration Tests",
    "Packages: OSCP, OSCE, CISSP",
];

/// Labelled external link
pub type LinkEntry = (&'static str, &'static str);

/// Researcher profiles
pub const PROFILES: [LinkEntry; 3] = [
    ("Cantina", "https://cantina.xyz/"),
    ("Sherlock", "https://sherlock.xyz/"),
    ("Immunefi", "https://immunefi.com/"),
];

/// Security review portfolios
pub const REVIEWS: [LinkEntry; 3] = [
    ("Cantina Reviews", "https://cantina.xyz/reviews"),
    ("Sherlock Reviews", "https://sherlock.xyz/reviews"),
    ("Immunefi Reviews", "https://immunefi.com/researchers"),
];

/// Markdown body of a section.
///
/// The blog section starts with an index; a loaded post replaces it at runtime.
pub fn section_markdown(section: Section) -> &'static str {
    match section {
        Section::About => ABOUT,
        Section::Experience => EXPERIENCE,
        Section::Skills => SKILLS,
        Section::Projects => PROJECTS,
        Section::Blog => BLOG_INDEX,
        Section::Contact => CONTACT,
    }
}

const ABOUT: &str = r#"
# whoami

Offensive security researcher focused on **smart contracts** and **DeFi
protocols**. I break things before attackers do: auditing Solidity and Vyper
codebases, modelling economic attacks and reviewing cross-chain bridges.

Before blockchain I spent years in classic offensive security, running
penetration tests against web applications and internal networks. That
background shapes how I read contracts: as systems with attack surfaces,
trust boundaries and failure modes.

- Competitive auditor on Cantina, Sherlock and Immunefi
- 50+ smart contract audits, 100+ penetration tests
- OSCP, OSCE, CISSP
"#;

const EXPERIENCE: &str = r#"
# Timeline

## Senior Blockchain Security Researcher
*2022 - Present*

- Lead auditor for lending, AMM and bridge protocols
- Reported critical findings through competitive audit platforms
- Built internal tooling for invariant and fuzz testing

## Penetration Tester
*2020 - 2022*

- Web, API and internal network assessments
- Red team engagements against financial institutions

## Security Analyst
*2018 - 2020*

- SOC triage, incident response and threat hunting
- Vulnerability management across a mixed Linux and Windows estate
"#;

const SKILLS: &str = r#"
# Languages

Solidity, Vyper, Rust, Python, Go, JavaScript

# Smart Contract Security

- Manual review of EVM protocols
- Invariant testing and fuzzing with Foundry and Echidna
- Static analysis with Slither and custom detectors
- Economic attack modelling: oracle manipulation, flash loans, MEV

# Offensive Security

- Web and API testing, Burp Suite
- Active Directory and internal network attacks
- Exploit development and reverse engineering

# Certifications

OSCP, OSCE, CISSP
"#;

const PROJECTS: &str = r#"
# Smart Contract Vulnerability Scanner

Static analyzer that flags reentrancy, unchecked external calls and unsafe
upgrade patterns across Solidity codebases.

# MEV Bot Detection System

Mempool and block analysis that fingerprints sandwich and arbitrage bots and
estimates extracted value per block.

# Cross-Chain Bridge Security Framework

Checklist and test harness for message verification, replay protection and
validator set changes in bridge contracts.
"#;

const BLOG_INDEX: &str = r#"
# Blog

Security articles and writeups.

Type `blog` to list posts and `blog <slug>` to read one.
"#;

const CONTACT: &str = r#"
# Get in touch

- Email: your.email@example.com
- Twitter: @YourTwitterHandle
- GitHub: github.com/YourUsername

Open to audit engagements and security research collaborations.
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_section_renders() {
        for section in Section::ALL {
            let lines = markdown::render(section_markdown(section));
            assert!(!lines.is_empty(), "{:?} has no content", section);
        }
    }

    #[test]
    fn test_find_file() {
        assert_eq!(find_file("about.txt").map(|f| f.size), Some(256));
        assert!(find_file("skills.txt").is_none());
        assert!(find_file("ABOUT.TXT").is_none());
    }
}
