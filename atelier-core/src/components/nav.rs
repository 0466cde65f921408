use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub name: &'static str,
    pub href: &'static str,
    pub icon: &'static str,
}

pub static NAVIGATION: [NavItem; 9] = [
    NavItem { name: "Dashboard", href: "/", icon: "LayoutDashboard" },
    NavItem { name: "Brief", href: "/brief", icon: "FileText" },
    NavItem { name: "Proposals", href: "/proposals", icon: "PresentationChart" },
    NavItem { name: "Timeline", href: "/timeline", icon: "Calendar" },
    NavItem { name: "Calendar", href: "/calendar", icon: "CalendarDays" },
    NavItem { name: "Tickets", href: "/tickets", icon: "AlertTriangle" },
    NavItem { name: "Documents", href: "/documents", icon: "FolderOpen" },
    NavItem { name: "Messages", href: "/messages", icon: "MessageSquare" },
    NavItem { name: "Payments", href: "/payments", icon: "CreditCard" },
];

/// The sidebar entry for `path`. `/` only matches exactly; other entries
/// also match their sub-paths.
pub fn active_item(path: &str) -> Option<&'static NavItem> {
    let path = match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    };
    NAVIGATION.iter().find(|item| {
        if item.href == "/" {
            path == "/"
        } else {
            path == item.href || path.starts_with(&format!("{}/", item.href))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_item() {
        assert_eq!(active_item("/").map(|i| i.name), Some("Dashboard"));
        assert_eq!(active_item("/tickets/").map(|i| i.name), Some("Tickets"));
        assert_eq!(active_item("/payments/4").map(|i| i.name), Some("Payments"));
        assert_eq!(active_item("/briefcase"), None);
    }
}
