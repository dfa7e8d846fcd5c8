use crate::objects::ObjectTable;
use crate::render::{
    description, resolve_address, service_name, target_action, RenderError, RenderOptions,
    RenderedAddress, Renderer, ANY,
};
use crate::rule::NumberedRule;

/// Flat PAN-OS `set` command output.
///
/// Output is a block of address/address-group commands followed by one block
/// per rule; every block ends with a blank line. The object block is written
/// even when empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct SetCommandRenderer;

impl Renderer for SetCommandRenderer {
    fn render(
        &self,
        rules: &[NumberedRule],
        table: &ObjectTable,
        options: &RenderOptions,
    ) -> Result<Vec<u8>, RenderError> {
        let mut out = String::new();
        push_block(&mut out, &object_commands(table));
        for rule in rules {
            push_block(&mut out, &rule_commands(rule, table, options));
        }
        Ok(out.into_bytes())
    }
}

/// Address commands for every object, then per group the materialized member
/// addresses followed by the group definition.
pub fn object_commands(table: &ObjectTable) -> Vec<String> {
    let mut cmds = Vec::new();
    for object in table.objects() {
        cmds.push(address_command(&object.name, &object.value));
    }
    for group in table.groups() {
        let mut quoted = Vec::with_capacity(group.members.len());
        for (name, value) in group.materialized() {
            cmds.push(address_command(&name, value));
            quoted.push(format!("\"{name}\""));
        }
        cmds.push(format!(
            "set address-group {} static {}",
            group.name,
            inline_list(&quoted)
        ));
    }
    cmds
}

/// Commands for one rule in fixed attribute order.
pub fn rule_commands(
    numbered: &NumberedRule,
    table: &ObjectTable,
    options: &RenderOptions,
) -> Vec<String> {
    let rule = &numbered.rule;
    let name = numbered.name();
    let prefix = format!("set rulebase security rules {name}");
    let source = format_value(&resolve_address(&rule.source, table));
    let destination = format_value(&resolve_address(&rule.destination, table));

    let mut cmds = vec![
        format!("{prefix} from {}", rule.from_zone),
        format!("{prefix} to {}", rule.to_zone),
        format!("{prefix} source {source}"),
        format!("{prefix} destination {destination}"),
        format!("{prefix} service {}", service_name(rule)),
        format!("{prefix} action {}", target_action(&rule.action)),
        format!("{prefix} source-user {ANY}"),
        format!("{prefix} disabled no"),
        format!("{prefix} log-start no"),
        format!("{prefix} log-end yes"),
    ];
    if options.include_tags {
        cmds.push(format!("{prefix} description \"{}\"", description(&name)));
        cmds.push(format!("{prefix} tag {}", options.tag_name));
    }
    cmds
}

fn address_command(name: &str, value: &str) -> String {
    format!("set address \"{name}\" ip-netmask {value}")
}

fn format_value(value: &RenderedAddress<'_>) -> String {
    match value {
        RenderedAddress::Single(v) => (*v).to_string(),
        RenderedAddress::List(names) => inline_list(names),
    }
}

fn inline_list(items: &[String]) -> String {
    format!("[ {} ]", items.join(" "))
}

fn push_block(out: &mut String, lines: &[String]) {
    out.push_str(&lines.join("\n"));
    out.push_str("\n\n");
}
