use super::error::{Error, Result};
use crate::cas::Hash;
use std::str;

/// A commit's metadata, as stored in the commit object payload: newline
/// separated `tree`, optional `parent`, `author`, `committer`, and `message`
/// lines.  Everything from the `message` line onward, embedded newlines
/// included, is the message body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub tree: Hash,
    pub parent: Option<Hash>,
    /// `<name> <email> <epochSeconds>`
    pub author: String,
    pub committer: String,
    pub message: String,
}

impl Commit {
    /// Render the canonical commit payload.
    pub fn render(&self) -> String {
        let mut text = format!("tree {}\n", self.tree);
        if let Some(ref parent) = self.parent {
            text.push_str(&format!("parent {}\n", parent));
        }
        text.push_str(&format!("author {}\n", self.author));
        text.push_str(&format!("committer {}\n", self.committer));
        text.push_str(&format!("message {}\n", self.message));
        text
    }

    /// Parse a commit object payload.
    pub fn parse(payload: &[u8]) -> Result<Commit> {
        let text = str::from_utf8(payload)
            .map_err(|_| Error::MalformedCommit("payload is not utf-8".to_string()))?;

        let mut tree = None;
        let mut parent = None;
        let mut author = String::new();
        let mut committer = String::new();
        let mut message: Option<String> = None;

        for line in text.lines() {
            if let Some(ref mut body) = message {
                body.push('\n');
                body.push_str(line);
            } else if let Some(rest) = line.strip_prefix("message ") {
                message = Some(rest.to_string());
            } else {
                let mut words = line.splitn(2, ' ');
                let key = words.next().unwrap_or("");
                let value = words.next().unwrap_or("").trim();
                match key {
                    "tree" => {
                        tree = Some(Hash::from_hex(value).map_err(|_| {
                            Error::MalformedCommit(format!("bad tree hash {:?}", value))
                        })?)
                    }
                    "parent" => {
                        parent = Some(Hash::from_hex(value).map_err(|_| {
                            Error::MalformedCommit(format!("bad parent hash {:?}", value))
                        })?)
                    }
                    "author" => author = value.to_string(),
                    "committer" => committer = value.to_string(),
                    // unknown keys are ignored, like short index lines
                    _ => (),
                }
            }
        }

        Ok(Commit {
            tree: tree.ok_or_else(|| Error::MalformedCommit("missing tree line".to_string()))?,
            parent,
            author,
            committer,
            message: message.unwrap_or_default(),
        })
    }

    /// The author's name and email, without the trailing timestamp.
    pub fn author_name(&self) -> String {
        match self.author.rsplitn(2, ' ').nth(1) {
            Some(name) => name.to_string(),
            None => self.author.clone(),
        }
    }

    /// The epoch seconds recorded on the author line, if parsable.
    pub fn timestamp(&self) -> Option<i64> {
        self.author.rsplit(' ').next()?.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::Commit;
    use crate::cas::Hash;
    use crate::repo::Error;

    fn tree_hash() -> Hash {
        Hash::from_hex("24185faae7d38a224b17113b6342b157c499a23c").unwrap()
    }

    fn parent_hash() -> Hash {
        Hash::from_hex("a9993e364706816aba3e25717850c26c9cd0d89d").unwrap()
    }

    #[test]
    fn render_root_commit_has_no_parent_line() {
        let commit = Commit {
            tree: tree_hash(),
            parent: None,
            author: "John Doe <john@example.com> 1700000000".to_string(),
            committer: "John Doe <john@example.com> 1700000000".to_string(),
            message: "first".to_string(),
        };
        let text = commit.render();
        assert!(text.starts_with("tree 24185faae7d38a224b17113b6342b157c499a23c\n"));
        assert!(!text.contains("parent"));
        assert!(text.ends_with("message first\n"));
    }

    #[test]
    fn parse_round_trip() {
        let commit = Commit {
            tree: tree_hash(),
            parent: Some(parent_hash()),
            author: "John Doe <john@example.com> 1700000000".to_string(),
            committer: "John Doe <john@example.com> 1700000000".to_string(),
            message: "second".to_string(),
        };
        assert_eq!(Commit::parse(commit.render().as_bytes()).unwrap(), commit);
    }

    #[test]
    fn parse_multiline_message() {
        let commit = Commit {
            tree: tree_hash(),
            parent: None,
            author: "John Doe <john@example.com> 1700000000".to_string(),
            committer: "John Doe <john@example.com> 1700000000".to_string(),
            message: "subject\n\nbody line one\nbody line two".to_string(),
        };
        let parsed = Commit::parse(commit.render().as_bytes()).unwrap();
        assert_eq!(parsed.message, commit.message);
    }

    #[test]
    fn message_lines_are_not_metadata() {
        // a message line starting with "parent " stays in the message
        let payload = format!(
            "tree {}\nauthor a <a@b> 1\ncommitter a <a@b> 1\nmessage top\nparent not-a-hash\n",
            tree_hash()
        );
        let parsed = Commit::parse(payload.as_bytes()).unwrap();
        assert_eq!(parsed.parent, None);
        assert_eq!(parsed.message, "top\nparent not-a-hash");
    }

    #[test]
    fn parse_missing_tree_is_malformed() {
        match Commit::parse(b"author a <a@b> 1\nmessage hi\n") {
            Err(Error::MalformedCommit(_)) => (),
            other => panic!("expected MalformedCommit, got {:?}", other),
        }
    }

    #[test]
    fn author_name_and_timestamp() {
        let commit = Commit {
            tree: tree_hash(),
            parent: None,
            author: "John Doe <john@example.com> 1700000000".to_string(),
            committer: "John Doe <john@example.com> 1700000000".to_string(),
            message: "m".to_string(),
        };
        assert_eq!(commit.author_name(), "John Doe <john@example.com>");
        assert_eq!(commit.timestamp(), Some(1700000000));
    }
}
