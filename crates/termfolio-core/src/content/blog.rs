//! Blog index and post loading

use std::path::Path;

use tracing::{debug, warn};

use crate::error::{Error, Result};

/// A post in the blog index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlogPost {
    /// Identifier typed after `blog`
    pub slug: &'static str,
    /// Display title
    pub title: &'static str,
    /// Markdown file, relative to the content root
    pub file: &'static str,
}

/// Published posts, in listing order
pub const POSTS: [BlogPost; 1] = [BlogPost {
    slug: "hello-world",
    title: "Hello World",
    file: "blogs/hello-world.md",
}];

/// Look up a post by slug
pub fn find(slug: &str) -> Option<&'static BlogPost> {
    POSTS.iter().find(|p| p.slug == slug)
}

/// Read a post's markdown from `root`
pub async fn load(root: &Path, post: &BlogPost) -> Result<String> {
    let path = root.join(post.file);
    debug!(slug = post.slug, path = %path.display(), "Loading blog post");

    match tokio::fs::read_to_string(&path).await {
        Ok(markdown) => Ok(markdown),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!(slug = post.slug, path = %path.display(), "Blog post file missing");
            Err(Error::not_found("blog post", post.slug))
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find() {
        assert_eq!(find("hello-world").map(|p| p.title), Some("Hello World"));
        assert!(find("nope").is_none());
    }

    #[tokio::test]
    async fn test_load_reads_relative_to_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("blogs")).unwrap();
        std::fs::write(dir.path().join("blogs/hello-world.md"), "# Hi\n").unwrap();

        let post = find("hello-world").unwrap();
        let markdown = load(dir.path(), post).await.unwrap();
        assert_eq!(markdown, "# Hi\n");
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let post = find("hello-world").unwrap();
        let err = load(dir.path(), post).await.unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }
}
