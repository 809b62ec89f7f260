use serde::Serialize;
use std::fmt;

/// Punctuation GitHub drops when it builds heading anchors.
const PUNCTUATORS: &str = "][!'#$%&()*+,./:;<=>?@\\^{|}~`\
    。，、；：？！…—·ˉ¨‘’“”々～‖∶＂＇｀｜〃〔〕〈〉《》「」『』．〖〗【】（）［］｛｝";

/// URL-safe anchor identifier derived from heading text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// GitHub-style slug: lowercase, whitespace runs become `-`, punctuation is
/// removed and leading/trailing dashes are stripped.
pub fn slugify(heading: &str) -> Slug {
    let mut out = String::with_capacity(heading.len());
    let mut in_space = false;

    for c in heading.trim().chars().flat_map(char::to_lowercase) {
        if c.is_whitespace() {
            if !in_space {
                out.push('-');
            }
            in_space = true;
            continue;
        }
        in_space = false;
        if !PUNCTUATORS.contains(c) {
            out.push(c);
        }
    }

    Slug(out.trim_matches('-').to_string())
}
