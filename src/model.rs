// src/model.rs
// =============================================================================
// The document tree: conference -> session -> talk.
//
// A conference starts life as a stub (URL + title) scraped from the index page.
// Discovery turns it into a full Conference by attaching its sessions, and
// from then on the tree is only read.
// =============================================================================

use url::Url;

/// Placeholder for a talk title or author that could not be extracted
pub const UNKNOWN: &str = "unknown";

/// A conference link found on the index page, not yet crawled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConferenceStub {
    pub url: Url,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conference {
    pub url: Url,
    pub title: String,
    /// In the order they appear on the conference page
    pub sessions: Vec<Session>,
}

impl Conference {
    /// Attaches a fully parsed session list to a stub
    pub fn from_stub(stub: ConferenceStub, sessions: Vec<Session>) -> Self {
        Self {
            url: stub.url,
            title: stub.title,
            sessions,
        }
    }

    pub fn talk_count(&self) -> usize {
        self.sessions.iter().map(|s| s.talks.len()).sum()
    }
}

/// A session always carries its complete talk list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub title: String,
    pub talks: Vec<Talk>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Talk {
    pub title: String,
    pub author: String,
    pub url: Url,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn talk(title: &str) -> Talk {
        Talk {
            title: title.to_string(),
            author: UNKNOWN.to_string(),
            url: Url::parse("https://example.org/t").unwrap(),
        }
    }

    #[test]
    fn test_talk_count_spans_sessions() {
        let stub = ConferenceStub {
            url: Url::parse("https://example.org/general-conference/2021/04").unwrap(),
            title: "April 2021".to_string(),
        };
        let conference = Conference::from_stub(
            stub,
            vec![
                Session {
                    title: "Saturday Morning".to_string(),
                    talks: vec![talk("a"), talk("b")],
                },
                Session {
                    title: "Saturday Afternoon".to_string(),
                    talks: vec![talk("c")],
                },
            ],
        );
        assert_eq!(conference.talk_count(), 3);
        assert_eq!(conference.title, "April 2021");
    }
}
