//! Object table construction from `object network` and `object-group network`
//! definitions.
//!
//! The table is built once per conversion and then only read. Both mappings keep
//! first-definition order so generated names and output ordering are stable for
//! unchanged input.

use std::collections::BTreeMap;

use crate::address::{is_dotted_quad, normalize};

/// A named single address from an `object network` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressObject {
    pub name: String,
    /// Canonical CIDR, host literal, or the raw address when normalization failed.
    pub value: String,
}

/// A named ordered address list from an `object-group network` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressGroup {
    pub name: String,
    pub members: Vec<String>,
}

impl AddressGroup {
    /// Deterministic names for each member: `{group}_1`, `{group}_2`, ...
    pub fn member_names(&self) -> Vec<String> {
        (1..=self.members.len())
            .map(|idx| materialized_name(&self.name, idx))
            .collect()
    }

    /// Member names paired with their addresses, in member order.
    pub fn materialized(&self) -> impl Iterator<Item = (String, &str)> + '_ {
        self.members
            .iter()
            .enumerate()
            .map(|(idx, value)| (materialized_name(&self.name, idx + 1), value.as_str()))
    }
}

/// Name of the `index`-th (1-based) member of `group` once expanded into an
/// individual address object.
pub fn materialized_name(group: &str, index: usize) -> String {
    format!("{group}_{index}")
}

/// Immutable name lookup for objects and groups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectTable {
    objects: Vec<AddressObject>,
    object_index: BTreeMap<String, usize>,
    groups: Vec<AddressGroup>,
    group_index: BTreeMap<String, usize>,
}

/// A group member as written in the source, before object references resolve.
enum PendingMember {
    Address(String),
    ObjectRef(String),
}

impl ObjectTable {
    /// Scan every line and collect object and group definitions.
    ///
    /// Unrecognized lines are ignored. A redefined object keeps its position and
    /// takes the newest value; a redefined group keeps collecting members.
    pub fn build<S: AsRef<str>>(lines: &[S]) -> Self {
        let mut table = Self::default();
        table.scan_objects(lines);
        table.scan_groups(lines);
        log::debug!(
            "object table built: {} objects, {} groups",
            table.objects.len(),
            table.groups.len()
        );
        table
    }

    /// Value of an address object.
    pub fn object(&self, name: &str) -> Option<&str> {
        self.object_index
            .get(name)
            .map(|idx| self.objects[*idx].value.as_str())
    }

    /// Address group by name.
    pub fn group(&self, name: &str) -> Option<&AddressGroup> {
        self.group_index.get(name).map(|idx| &self.groups[*idx])
    }

    /// Objects in first-definition order.
    pub fn objects(&self) -> &[AddressObject] {
        &self.objects
    }

    /// Groups in first-definition order.
    pub fn groups(&self) -> &[AddressGroup] {
        &self.groups
    }

    fn scan_objects<S: AsRef<str>>(&mut self, lines: &[S]) {
        let mut current: Option<String> = None;
        for line in lines {
            let tokens: Vec<&str> = line.as_ref().split_whitespace().collect();
            match tokens.as_slice() {
                ["object", "network", .., name] => current = Some((*name).to_string()),
                ["host", ip, ..] => {
                    if let Some(name) = &current {
                        self.set_object(name, (*ip).to_string());
                    }
                }
                ["subnet", ip, mask] => {
                    if let Some(name) = &current {
                        self.set_object(name, normalize(ip, mask));
                    }
                }
                [ip, mask] if is_dotted_quad(ip) => {
                    if let Some(name) = &current {
                        self.set_object(name, normalize(ip, mask));
                    }
                }
                _ => {}
            }
        }
    }

    fn scan_groups<S: AsRef<str>>(&mut self, lines: &[S]) {
        let mut current: Option<String> = None;
        let mut pending: Vec<(String, PendingMember)> = Vec::new();
        for line in lines {
            let tokens: Vec<&str> = line.as_ref().split_whitespace().collect();
            match tokens.as_slice() {
                ["object-group", "network", .., name] => {
                    self.ensure_group(name);
                    current = Some((*name).to_string());
                }
                ["network-object", rest @ ..] => {
                    let Some(group) = &current else {
                        continue;
                    };
                    let member = match rest {
                        ["host", ip, ..] => PendingMember::Address((*ip).to_string()),
                        ["object", name, ..] => PendingMember::ObjectRef((*name).to_string()),
                        [ip, mask] => PendingMember::Address(normalize(ip, mask)),
                        _ => continue,
                    };
                    pending.push((group.clone(), member));
                }
                _ => {}
            }
        }

        for (group, member) in pending {
            let value = match member {
                PendingMember::Address(value) => value,
                PendingMember::ObjectRef(name) => match self.object(&name) {
                    Some(value) => value.to_string(),
                    None => name,
                },
            };
            if let Some(idx) = self.group_index.get(&group) {
                self.groups[*idx].members.push(value);
            }
        }
    }

    fn set_object(&mut self, name: &str, value: String) {
        match self.object_index.get(name) {
            Some(idx) => self.objects[*idx].value = value,
            None => {
                self.object_index
                    .insert(name.to_string(), self.objects.len());
                self.objects.push(AddressObject {
                    name: name.to_string(),
                    value,
                });
            }
        }
    }

    fn ensure_group(&mut self, name: &str) {
        if self.group_index.contains_key(name) {
            return;
        }
        self.group_index.insert(name.to_string(), self.groups.len());
        self.groups.push(AddressGroup {
            name: name.to_string(),
            members: Vec::new(),
        });
    }
}
