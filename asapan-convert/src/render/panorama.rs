use xml_tree_core::{write_document, XmlNode};

use crate::objects::ObjectTable;
use crate::render::{
    description, resolve_address, service_name, target_action, RenderError, RenderOptions,
    Renderer, ANY,
};
use crate::rule::NumberedRule;

/// Device entry name Panorama uses for its own configuration tree.
pub const DEVICE_ENTRY: &str = "localhost.localdomain";

/// Device group used when none is configured.
pub const DEFAULT_DEVICE_GROUP: &str = "MyDeviceGroup";

/// Panorama XML output.
///
/// Objects and groups go under the device entry's `shared` section; rules go
/// into the device group's pre-rulebase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanoramaRenderer {
    pub device_group: String,
}

impl PanoramaRenderer {
    pub fn new(device_group: impl Into<String>) -> Self {
        Self {
            device_group: device_group.into(),
        }
    }

    /// Build the full `<config>` tree.
    pub fn build_document(
        &self,
        rules: &[NumberedRule],
        table: &ObjectTable,
        options: &RenderOptions,
    ) -> XmlNode {
        let mut device = XmlNode::new("entry").with_attribute("name", DEVICE_ENTRY);
        device.push_child(shared_section(table));

        let mut rulebase = XmlNode::new("rules");
        for rule in rules {
            rulebase.push_child(rule_entry(rule, table, options));
        }
        device
            .ensure_child_mut("device-group")
            .push_child(XmlNode::new("entry").with_attribute("name", self.device_group.as_str()))
            .ensure_child_mut("pre-rulebase")
            .ensure_child_mut("security")
            .push_child(rulebase);

        let mut config = XmlNode::new("config");
        config.ensure_child_mut("devices").push_child(device);
        config
    }
}

impl Renderer for PanoramaRenderer {
    fn render(
        &self,
        rules: &[NumberedRule],
        table: &ObjectTable,
        options: &RenderOptions,
    ) -> Result<Vec<u8>, RenderError> {
        let document = self.build_document(rules, table, options);
        Ok(write_document(&document)?)
    }
}

fn shared_section(table: &ObjectTable) -> XmlNode {
    let mut address = XmlNode::new("address");
    let mut address_group = XmlNode::new("address-group");

    for object in table.objects() {
        address.push_child(address_entry(&object.name, &object.value));
    }
    for group in table.groups() {
        let mut members = XmlNode::new("static");
        for (name, value) in group.materialized() {
            address.push_child(address_entry(&name, value));
            members.push_child(XmlNode::text_element("member", name));
        }
        address_group
            .push_child(XmlNode::new("entry").with_attribute("name", group.name.as_str()))
            .push_child(members);
    }

    let mut shared = XmlNode::new("shared");
    shared.push_child(address);
    shared.push_child(address_group);
    shared
}

fn address_entry(name: &str, value: &str) -> XmlNode {
    let mut entry = XmlNode::new("entry").with_attribute("name", name);
    entry.push_child(XmlNode::text_element("ip-netmask", value));
    entry
}

fn rule_entry(numbered: &NumberedRule, table: &ObjectTable, options: &RenderOptions) -> XmlNode {
    let rule = &numbered.rule;
    let name = numbered.name();
    let mut entry = XmlNode::new("entry").with_attribute("name", name.as_str());

    entry.push_child(members("from", [rule.from_zone.as_str()]));
    entry.push_child(members("to", [rule.to_zone.as_str()]));
    entry.push_child(members(
        "source",
        resolve_address(&rule.source, table).values(),
    ));
    entry.push_child(members(
        "destination",
        resolve_address(&rule.destination, table).values(),
    ));
    entry.push_child(members("service", [service_name(rule).as_str()]));
    entry.push_child(XmlNode::text_element("action", target_action(&rule.action)));
    entry.push_child(members("source-user", [ANY]));
    entry.push_child(XmlNode::text_element("log-end", "yes"));
    if options.include_tags {
        entry.push_child(XmlNode::text_element("description", description(&name)));
        entry.push_child(members("tag", [options.tag_name.as_str()]));
    }
    entry
}

fn members<'a>(tag: &str, values: impl IntoIterator<Item = &'a str>) -> XmlNode {
    let mut node = XmlNode::new(tag);
    for value in values {
        node.push_child(XmlNode::text_element("member", value));
    }
    node
}
