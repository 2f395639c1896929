use lazy_static::lazy_static;
use regex::Regex;
use std::io::{self, BufRead, ErrorKind};

use crate::{
    constants,
    model::{category, channel::Channel},
};

lazy_static! {
    static ref GROUP_TITLE: Regex = Regex::new(r#"group-title="([^"]+)""#).unwrap();
}

/// Fields collected since the last emitted channel.
#[derive(Debug, Default)]
struct Pending {
    title: String,
    url: String,
    // not cleared on emit, so it carries over to the next entry without a group of its own
    group: String,
}

/// Reads a whole playlist and returns its channels in order of appearance.
///
/// Rules:
///     - `#EXTGRP:<group>` sets the group of the entries that follow
///     - `#EXTINF:<attrs>,<title>` sets the title, a `group-title="..."` attribute overrides the group
///     - any other line starting with `#` is a comment
///     - any other non-empty line is a url and completes the entry
///
/// A read error ends the scan early, the channels parsed up to that point are returned.
pub fn parse(mut reader: impl BufRead) -> Vec<Channel> {
    let mut channels = Vec::new();
    let mut pending = Pending::default();
    let mut next_id = constants::FIRST_CHANNEL_ID;
    let mut buf = Vec::new();
    let mut after_cr = false;
    let mut line_no = 0;
    loop {
        buf.clear();
        match read_line(&mut reader, &mut buf, &mut after_cr) {
            Ok(false) => break,
            Ok(true) => (),
            Err(e) => {
                log::error!("error reading playlist at line {}: {}", line_no + 1, e);
                break;
            }
        }
        line_no += 1;
        let line = String::from_utf8_lossy(&buf);
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        log::debug!("line {}: {}", line_no, line);

        if let Some(group) = line.strip_prefix(constants::EXTGRP_PREFIX) {
            pending.group = group.trim().to_string();
            log::debug!("group from #EXTGRP: {}", pending.group);
        } else if line.starts_with(constants::EXTINF_PREFIX) {
            pending.title = parse_title(line);
            if let Some(group) = parse_group_title(line) {
                log::debug!("group from group-title: {}", group);
                pending.group = group;
            }
            log::debug!("title: {}", pending.title);
        } else if !line.starts_with('#') {
            pending.url = line.to_string();
            log::debug!(
                "url: {} (title: `{}`, group: `{}`)",
                pending.url,
                pending.title,
                pending.group
            );
            if !pending.title.is_empty() && !pending.url.is_empty() {
                let category = if pending.group.is_empty() {
                    category::infer(&pending.title).to_string()
                } else {
                    pending.group.clone()
                };
                let title = std::mem::take(&mut pending.title);
                let url = std::mem::take(&mut pending.url);
                let channel = Channel::new_direct(next_id, title, url, category);
                log::debug!("new channel {}: {}", channel.id, channel);
                channels.push(channel);
                next_id += 1;
            }
        }
    }
    log::debug!("parsed {} channels", channels.len());

    channels
}

/// Reads one line into `buf` without its terminator, which is `\n`, `\r` or `\r\n`.
/// `after_cr` remembers a `\r` that ended the previous line, so a `\n` split off into
/// the next buffer fill is not taken for an empty line.
/// Returns `false` at the end of input.
fn read_line(
    reader: &mut impl BufRead,
    buf: &mut Vec<u8>,
    after_cr: &mut bool,
) -> io::Result<bool> {
    loop {
        let available = match reader.fill_buf() {
            Ok(available) => available,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        if available.is_empty() {
            return Ok(!buf.is_empty());
        }
        let start = if std::mem::take(after_cr) && available[0] == b'\n' {
            1
        } else {
            0
        };
        match available[start..]
            .iter()
            .position(|&b| b == b'\n' || b == b'\r')
        {
            Some(i) => {
                let end = start + i;
                buf.extend_from_slice(&available[start..end]);
                *after_cr = available[end] == b'\r';
                reader.consume(end + 1);
                return Ok(true);
            }
            None => {
                buf.extend_from_slice(&available[start..]);
                let used = available.len();
                reader.consume(used);
            }
        }
    }
}

fn parse_title(line: &str) -> String {
    let title = match line.rfind(',') {
        Some(i) if i + 1 < line.len() => line[i + 1..].trim().to_string(),
        _ => {
            log::warn!("no title after a comma in `{}`", line);
            line.replace(constants::EXTINF_PREFIX, "").trim().to_string()
        }
    };
    if title.is_empty() {
        log::warn!("empty title in `{}`", line);
        return constants::UNKNOWN_TITLE.into();
    }

    title
}

fn parse_group_title(line: &str) -> Option<String> {
    GROUP_TITLE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|group| !group.is_empty())
}
