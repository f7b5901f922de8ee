//! Tagged block stripping.
//!
//! A block is a `<tag>...</tag>` pair opened inside a line comment or a
//! block comment:
//!
//! ```text
//! // <debug>log(state);</debug>
//! /*<compat>
//! legacy();
//! </compat>*/
//! ```
//!
//! A block is removed only when its content never ends the comment it
//! opened in: no newline after `//`, no `*/` after `/*`. Anything else is
//! left as written, and scanning resumes right after its opening comment
//! marker, so a later block on the same span can still be removed.

use anyhow::{Context, Result};
use regex::Regex;

/// Build the matcher for one block tag.
fn block_pattern(tag: &str) -> Result<Regex> {
    let tag = regex::escape(tag);
    let pattern = format!(r"(?s)(/[/*])\s*<{tag}>(.*?)</{tag}>(?:\s*\*/)?");
    Regex::new(&pattern).with_context(|| format!("invalid block tag: {}", tag))
}

/// Whether `content` closes the comment that opened the block.
fn is_unterminated(opener: &str, content: &str) -> bool {
    match opener {
        "//" => content.contains('\n'),
        _ => content.contains("*/"),
    }
}

/// Remove every block of `tag` from `source`.
pub fn strip_block(source: &str, tag: &str) -> Result<String> {
    let pattern = block_pattern(tag)?;
    let mut output = String::with_capacity(source.len());
    let mut copied = 0;
    let mut at = 0;

    while let Some(caps) = pattern.captures_at(source, at) {
        let (Some(block), Some(opener)) = (caps.get(0), caps.get(1)) else {
            break;
        };
        if is_unterminated(opener.as_str(), &caps[2]) {
            at = opener.end();
            continue;
        }
        output.push_str(&source[copied..block.start()]);
        copied = block.end();
        at = block.end();
    }

    output.push_str(&source[copied..]);
    Ok(output)
}

/// Remove every block of each tag in `tags`, in order.
pub fn strip_blocks<S: AsRef<str>>(source: &str, tags: &[S]) -> Result<String> {
    let mut output = source.to_string();
    for tag in tags {
        output = strip_block(&output, tag.as_ref())?;
        tracing::trace!("stripped `{}` blocks", tag.as_ref());
    }
    Ok(output)
}
