//! The `node:` protocol prefix on Node.js built-in modules.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use rustc_hash::FxHashSet;

pub const NODE_PROTOCOL: &str = "node:";

/// Built-in modules importable both with and without the `node:` prefix.
pub const NODE_BUILTIN_MODULES: &[&str] = &[
    "_http_agent",
    "_http_client",
    "_http_common",
    "_http_incoming",
    "_http_outgoing",
    "_http_server",
    "_stream_duplex",
    "_stream_passthrough",
    "_stream_readable",
    "_stream_transform",
    "_stream_wrap",
    "_stream_writable",
    "_tls_common",
    "_tls_wrap",
    "assert",
    "assert/strict",
    "async_hooks",
    "buffer",
    "child_process",
    "cluster",
    "console",
    "constants",
    "crypto",
    "dgram",
    "diagnostics_channel",
    "dns",
    "dns/promises",
    "domain",
    "events",
    "fs",
    "fs/promises",
    "http",
    "http2",
    "https",
    "inspector",
    "inspector/promises",
    "module",
    "net",
    "os",
    "path",
    "path/posix",
    "path/win32",
    "perf_hooks",
    "process",
    "punycode",
    "querystring",
    "readline",
    "readline/promises",
    "repl",
    "stream",
    "stream/consumers",
    "stream/promises",
    "stream/web",
    "string_decoder",
    "sys",
    "timers",
    "timers/promises",
    "tls",
    "trace_events",
    "tty",
    "url",
    "util",
    "util/types",
    "v8",
    "vm",
    "wasi",
    "worker_threads",
    "zlib",
];

/// Built-ins that exist only with the prefix: `test` without it is an
/// ordinary npm package.
pub const PREFIX_ONLY_BUILTIN_MODULES: &[&str] = &["sea", "sqlite", "test", "test/reporters"];

static BUILTINS: Lazy<FxHashSet<&'static str>> = Lazy::new(|| NODE_BUILTIN_MODULES.iter().copied().collect());

static PREFIX_ONLY: Lazy<FxHashSet<&'static str>> =
    Lazy::new(|| PREFIX_ONLY_BUILTIN_MODULES.iter().copied().collect());

/// Whether `name` (without prefix) or its first path segment is in `set`.
fn in_set(set: &FxHashSet<&'static str>, name: &str) -> bool {
    if set.contains(name) {
        return true;
    }
    match name.split_once('/') {
        Some((head, _)) => set.contains(head),
        None => false,
    }
}

/// Exact built-in name without the prefix, as listed by Node.
pub fn is_listed_builtin(path: &str) -> bool {
    BUILTINS.contains(path)
}

/// Whether `path` names a Node.js built-in, with or without prefix, subpaths
/// included.
pub fn is_node_builtin(path: &str) -> bool {
    match path.strip_prefix(NODE_PROTOCOL) {
        Some(bare) => in_set(&BUILTINS, bare) || in_set(&PREFIX_ONLY, bare),
        None => in_set(&BUILTINS, path),
    }
}

/// Add (`Some(true)`), strip (`Some(false)`) or keep (`None`) the `node:`
/// prefix of a built-in module path. Other paths are returned unchanged.
pub fn apply_node_protocol(path: &str, node_protocol: Option<bool>) -> Cow<'_, str> {
    let Some(add) = node_protocol else {
        return Cow::Borrowed(path);
    };
    match path.strip_prefix(NODE_PROTOCOL) {
        Some(bare) if !add && in_set(&BUILTINS, bare) => Cow::Borrowed(bare),
        Some(_) => Cow::Borrowed(path),
        None if add && in_set(&BUILTINS, path) => Cow::Owned(format!("{NODE_PROTOCOL}{path}")),
        None => Cow::Borrowed(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adds_and_strips_prefix() {
        assert_eq!(apply_node_protocol("fs", Some(true)), "node:fs");
        assert_eq!(apply_node_protocol("fs/promises", Some(true)), "node:fs/promises");
        assert_eq!(apply_node_protocol("node:fs", Some(true)), "node:fs");
        assert_eq!(apply_node_protocol("node:fs", Some(false)), "fs");
        assert_eq!(apply_node_protocol("fs", Some(false)), "fs");
        assert_eq!(apply_node_protocol("fs", None), "fs");
        assert_eq!(apply_node_protocol("node:fs", None), "node:fs");
    }

    #[test]
    fn test_non_builtins_untouched() {
        for mode in [Some(true), Some(false), None] {
            assert_eq!(apply_node_protocol("my-fs", mode), "my-fs");
            assert_eq!(apply_node_protocol("./fs", mode), "./fs");
            assert_eq!(apply_node_protocol("fs-extra", mode), "fs-extra");
        }
    }

    #[test]
    fn test_prefix_only_builtins_keep_prefix() {
        assert_eq!(apply_node_protocol("node:test", Some(false)), "node:test");
        assert_eq!(apply_node_protocol("node:sqlite", Some(false)), "node:sqlite");
        assert_eq!(apply_node_protocol("test", Some(true)), "test");
        assert!(is_node_builtin("node:test/reporters"));
        assert!(!is_node_builtin("test"));
    }

    #[test]
    fn test_subpath_builtins() {
        assert!(is_node_builtin("stream/web"));
        assert!(is_node_builtin("node:util/types"));
        assert!(!is_node_builtin("streams"));
        assert!(is_listed_builtin("path"));
        assert!(!is_listed_builtin("node:path"));
    }
}
