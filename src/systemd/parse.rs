// Parsers for the textual output of `systemctl`.

use crate::model::{Service, ServiceState};
use log::warn;
use std::collections::{HashMap, HashSet};

/// One `key=value` block of `systemctl show` output.
pub type Properties = HashMap<String, String>;

/// Extracts plain service unit names from `systemctl list-unit-files --no-legend` output.
///
/// Templates and instances (anything containing `@`) are dropped, as are
/// non-service units. Duplicates keep their first position.
pub fn parse_unit_files(output: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    output
        .lines()
        .filter_map(|line| line.split_whitespace().next())
        .filter(|unit| unit.ends_with(".service") && !unit.contains('@'))
        .filter(|unit| seen.insert(*unit))
        .map(str::to_string)
        .collect()
}

/// Groups `systemctl show` output into property blocks separated by blank lines.
pub fn parse_show_blocks(output: &str) -> Vec<Properties> {
    let mut blocks = Vec::new();
    let mut current = Properties::new();

    for line in output.lines() {
        if line.is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else if let Some((key, value)) = line.split_once('=') {
            current.insert(key.to_string(), value.to_string());
        }
    }

    if !current.is_empty() {
        blocks.push(current);
    }
    blocks
}

/// Decodes systemd's `\xNN` escapes, e.g. `foo\x2dbar` -> `foo-bar`.
/// Malformed escapes are kept as they are.
pub fn unescape_unit_name(name: &str) -> String {
    let bytes = name.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'\\' && bytes.get(i + 1) == Some(&b'x') {
            let decoded = name
                .get(i + 2..i + 4)
                .filter(|hex| hex.bytes().all(|b| b.is_ascii_hexdigit()))
                .and_then(|hex| u8::from_str_radix(hex, 16).ok());
            if let Some(byte) = decoded {
                out.push(byte);
                i += 4;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }

    String::from_utf8_lossy(&out).into_owned()
}

/// Builds a [`Service`] from one property block. Returns `None` without an `Id`.
pub fn service_from_properties(props: &Properties) -> Option<Service> {
    let id = props.get("Id")?.clone();
    let stem = match id.rsplit_once('.') {
        Some((stem, _suffix)) => stem,
        None => id.as_str(),
    };
    let name = unescape_unit_name(stem);

    let field = |key: &str| props.get(key).cloned().unwrap_or_default();
    let sub_state = field("SubState");
    let running = sub_state == "running";

    Some(Service {
        name,
        running,
        state: if running {
            ServiceState::Running
        } else {
            ServiceState::Stopped
        },
        description: field("Description"),
        load_state: field("LoadState"),
        active_state: field("ActiveState"),
        sub_state,
        id,
    })
}

/// Turns full `systemctl show` output into services, first occurrence of a name wins.
pub fn services_from_show(output: &str) -> Vec<Service> {
    let mut used_names = HashSet::new();
    let mut services = Vec::new();

    for block in parse_show_blocks(output) {
        let Some(service) = service_from_properties(&block) else {
            warn!("skipping systemctl show block without Id ({} properties)", block.len());
            continue;
        };
        if used_names.insert(service.name.clone()) {
            services.push(service);
        }
    }
    services
}
