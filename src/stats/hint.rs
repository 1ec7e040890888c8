//! Hints for well-known failure messages.

use console::style;
use once_cell::sync::Lazy;
use regex::Regex;

static UNRESOLVED_MODULE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Can't resolve '(\w+)'").expect("valid unresolved-module regex"));

/// Node.js built-ins that cannot be bundled for the browser without a polyfill.
pub const NODE_BUILTIN_MODULES: &[&str] = &[
    "assert",
    "buffer",
    "child_process",
    "cluster",
    "console",
    "constants",
    "crypto",
    "dgram",
    "dns",
    "domain",
    "events",
    "fs",
    "http",
    "https",
    "module",
    "net",
    "os",
    "path",
    "punycode",
    "process",
    "querystring",
    "readline",
    "repl",
    "stream",
    "_stream_duplex",
    "_stream_passthrough",
    "_stream_readable",
    "_stream_transform",
    "_stream_writable",
    "string_decoder",
    "sys",
    "timers",
    "tls",
    "tty",
    "url",
    "util",
    "vm",
    "zlib",
];

/// Append a polyfill tip when a client build fails to resolve a Node.js built-in.
pub fn hint_node_polyfill(message: &str) -> String {
    if !message.contains("Can't resolve") {
        return message.to_string();
    }

    let Some(module_name) =
        UNRESOLVED_MODULE.captures(message).and_then(|caps| caps.get(1)).map(|m| m.as_str())
    else {
        return message.to_string();
    };

    if !NODE_BUILTIN_MODULES.contains(&module_name) {
        return message.to_string();
    }

    let tips = [
        format!(
            "Tip: \"{module_name}\" is a built-in Node.js module and cannot be imported in client-side code."
        ),
        "Check if you need to import Node.js module. If needed, you can use \"@rsbuild/plugin-node-polyfill\"."
            .to_string(),
    ];
    format!("{message}\n\n{}", style(tips.join("\n")).yellow())
}
