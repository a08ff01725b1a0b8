//! Top-level modules of the Python standard library
//!
//! Used to drop stdlib imports from the manifest when the caller asks for
//! third-party requirements only.

/// Top-level standard library module names (CPython 3.8 through 3.13).
pub const PYTHON_STDLIB: &[&str] = &[
    "abc", "aifc", "argparse", "array", "ast", "asynchat", "asyncio", "asyncore", "atexit",
    "audioop", "base64", "bdb", "binascii", "bisect", "builtins", "bz2", "calendar", "cgi",
    "cgitb", "chunk", "cmath", "cmd", "code", "codecs", "codeop", "collections", "colorsys",
    "compileall", "concurrent", "configparser", "contextlib", "contextvars", "copy", "copyreg",
    "cProfile", "crypt", "csv", "ctypes", "curses", "dataclasses", "datetime", "dbm", "decimal",
    "difflib", "dis", "distutils", "doctest", "email", "encodings", "enum", "errno",
    "faulthandler", "fcntl", "filecmp", "fileinput", "fnmatch", "fractions", "ftplib", "functools",
    "__future__", "gc", "getopt", "getpass", "gettext", "glob", "graphlib", "grp", "gzip",
    "hashlib", "heapq", "hmac", "html", "http", "imaplib", "imghdr", "importlib", "inspect", "io",
    "ipaddress", "itertools", "json", "keyword", "linecache", "locale", "logging", "lzma",
    "mailbox", "mailcap", "marshal", "math", "mimetypes", "mmap", "modulefinder", "msvcrt",
    "multiprocessing", "netrc", "nntplib", "ntpath", "nturl2path", "numbers", "opcode", "operator",
    "optparse", "os", "pathlib", "pdb", "pickle", "pickletools", "pipes", "pkgutil", "platform",
    "plistlib", "poplib", "posix", "posixpath", "pprint", "profile", "pstats", "pty", "pwd",
    "pyclbr", "pydoc", "queue", "quopri", "random", "re", "readline", "reprlib", "resource",
    "rlcompleter", "runpy", "sched", "secrets", "select", "selectors", "shelve", "shlex", "shutil",
    "signal", "site", "smtpd", "smtplib", "sndhdr", "socket", "socketserver", "sqlite3",
    "sre_compile", "sre_parse", "ssl", "stat", "statistics", "string", "stringprep", "struct",
    "subprocess", "sunau", "symbol", "symtable", "sys", "sysconfig", "syslog", "tabnanny",
    "tarfile", "telnetlib", "tempfile", "termios", "textwrap", "_thread", "threading", "time",
    "timeit", "tkinter", "token", "tokenize", "tomllib", "trace", "traceback", "tracemalloc",
    "tty", "turtle", "types", "typing", "unicodedata", "unittest", "urllib", "uu", "uuid", "venv",
    "warnings", "wave", "weakref", "webbrowser", "winreg", "winsound", "wsgiref", "xdrlib", "xml",
    "xmlrpc", "zipapp", "zipfile", "zipimport", "zlib", "zoneinfo",
];

/// Check whether a module path belongs to the standard library.
///
/// Only the first dotted component is compared, so `os.path` and
/// `xml.etree.ElementTree` count as stdlib.
///
/// # Examples
///
/// ```
/// use reqdrop::stdlib::is_stdlib_module;
///
/// assert!(is_stdlib_module("os.path"));
/// assert!(!is_stdlib_module("requests"));
/// ```
pub fn is_stdlib_module(module: &str) -> bool {
    let top = module.split('.').next().unwrap_or(module);
    PYTHON_STDLIB.contains(&top)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_stdlib_modules() {
        for module in ["os", "sys", "json", "collections", "__future__", "typing"] {
            assert!(is_stdlib_module(module), "{} should be stdlib", module);
        }
    }

    #[test]
    fn test_dotted_stdlib_paths() {
        assert!(is_stdlib_module("os.path"));
        assert!(is_stdlib_module("concurrent.futures"));
        assert!(is_stdlib_module("xml.etree.ElementTree"));
    }

    #[test]
    fn test_third_party_modules() {
        for module in ["requests", "numpy", "flask.views", "yaml", "osgeo"] {
            assert!(!is_stdlib_module(module), "{} should not be stdlib", module);
        }
    }
}
