/// Request filter. An empty allow-list admits everyone; otherwise the
/// requester must be named on it.
pub fn admit(allowed_users: &[String], requester: Option<&str>) -> bool {
    if allowed_users.is_empty() {
        return true;
    }
    match requester.map(str::trim) {
        Some(id) if !id.is_empty() => allowed_users.iter().any(|u| u == id),
        _ => false,
    }
}
