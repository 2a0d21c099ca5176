use std::env;
use std::path::Path;

/// `USER@HOST:CWD$ `, with `#` for the superuser and `?` for anything that
/// cannot be determined.
pub fn render(cwd: &Path) -> String {
    let home = dirs::home_dir();
    compose(
        env::var("USER").ok().as_deref(),
        hostname().as_deref(),
        Some(&collapse_home(cwd, home.as_deref())),
        is_superuser(),
    )
}

fn compose(user: Option<&str>, host: Option<&str>, dir: Option<&str>, superuser: bool) -> String {
    let known = |part: Option<&str>| part.filter(|s| !s.is_empty()).unwrap_or("?").to_string();
    let sigil = if superuser { '#' } else { '$' };
    format!("{}@{}:{}{} ", known(user), known(host), known(dir), sigil)
}

fn collapse_home(cwd: &Path, home: Option<&Path>) -> String {
    let relative = home
        .filter(|home| !home.as_os_str().is_empty())
        .and_then(|home| cwd.strip_prefix(home).ok());

    match relative {
        Some(rest) if rest.as_os_str().is_empty() => "~".to_string(),
        Some(rest) => format!("~/{}", rest.display()),
        None => cwd.display().to_string(),
    }
}

/// Short host name, up to the first dot.
fn hostname() -> Option<String> {
    let mut buf = [0u8; 256];
    // SAFETY: the buffer outlives the call and its length is passed along.
    let rc = unsafe { libc::gethostname(buf.as_mut_ptr().cast(), buf.len()) };
    if rc != 0 {
        return None;
    }

    let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    let name = String::from_utf8_lossy(&buf[..end]);
    let short = name.split('.').next().unwrap_or_default();
    (!short.is_empty()).then(|| short.to_string())
}

fn is_superuser() -> bool {
    // SAFETY: geteuid has no preconditions and cannot fail.
    unsafe { libc::geteuid() == 0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_home() {
        let home = Path::new("/home/joe");
        assert_eq!(collapse_home(Path::new("/home/joe"), Some(home)), "~");
        assert_eq!(
            collapse_home(Path::new("/home/joe/src/burrow"), Some(home)),
            "~/src/burrow"
        );
        assert_eq!(
            collapse_home(Path::new("/home/joey"), Some(home)),
            "/home/joey"
        );
        assert_eq!(collapse_home(Path::new("/tmp"), None), "/tmp");
        assert_eq!(
            collapse_home(Path::new("/tmp"), Some(Path::new(""))),
            "/tmp"
        );
    }

    #[test]
    fn test_compose() {
        assert_eq!(
            compose(Some("joe"), Some("box"), Some("~"), false),
            "joe@box:~$ "
        );
        assert_eq!(
            compose(Some("root"), Some("box"), Some("/"), true),
            "root@box:/# "
        );
        assert_eq!(compose(None, Some(""), None, false), "?@?:?$ ");
    }

    #[test]
    fn test_render_ends_with_sigil() {
        let prompt = render(Path::new("/"));
        assert!(prompt.ends_with("$ ") || prompt.ends_with("# "));
        assert!(prompt.contains('@'));
    }
}
