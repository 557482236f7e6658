//! Front page and posts page wiring

use super::wp::WpCli;
use crate::output;
use crate::runtime::command::CommandRunner;
use serde::Deserialize;

const HOME_NAMES: [&str; 2] = ["home", "homepage"];
const BLOG_NAMES: [&str; 2] = ["blog", "news"];

/// A row of `wp post list --post_type=page --format=json`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PageRecord {
    #[serde(rename = "ID")]
    pub id: u64,
    #[serde(default)]
    pub post_title: String,
    #[serde(default)]
    pub post_name: String,
}

impl PageRecord {
    fn is_named(&self, names: &[&str]) -> bool {
        let slug = self.post_name.to_lowercase();
        let title = self.post_title.to_lowercase();
        names.iter().any(|n| slug == *n || title == *n)
    }
}

/// First page named like a home page and first named like a blog page
pub fn find_front_and_blog(pages: &[PageRecord]) -> (Option<u64>, Option<u64>) {
    let home = pages.iter().find(|p| p.is_named(&HOME_NAMES)).map(|p| p.id);
    let blog = pages.iter().find(|p| p.is_named(&BLOG_NAMES)).map(|p| p.id);
    (home, blog)
}

/// Which reading settings were applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageWiring {
    HomeAndBlog { home: u64, blog: u64 },
    HomeOnly { home: u64 },
    /// Only a blog page exists; WordPress defaults are kept
    Unchanged,
}

/// Set `page_on_front` / `page_for_posts` from the imported pages
pub fn wire_pages<R: CommandRunner>(wp: &WpCli<R>) -> PageWiring {
    output::line("Checking for home and blog pages...");

    let list = wp.run(["post", "list", "--post_type=page", "--format=json"]);
    if !list.success() {
        output::warning(format!(
            "Could not list pages: {}",
            output::one_line(&list.combined())
        ));
        return PageWiring::Unchanged;
    }

    let pages: Vec<PageRecord> = match serde_json::from_str(list.stdout.trim()) {
        Ok(pages) => pages,
        Err(e) => {
            output::warning(format!("Could not parse page list: {}", e));
            return PageWiring::Unchanged;
        }
    };

    match find_front_and_blog(&pages) {
        (Some(home), Some(blog)) => {
            output::line("Configuring page settings...");
            let home_id = home.to_string();
            let blog_id = blog.to_string();
            let ok = [
                wp.option_update("page_for_posts", &blog_id),
                wp.option_update("page_on_front", &home_id),
                wp.option_update("show_on_front", "page"),
            ]
            .iter()
            .all(|o| o.success());
            if ok {
                output::success(format!(
                    "Set home page (ID: {}) and blog page (ID: {})",
                    home, blog
                ));
            }
            PageWiring::HomeAndBlog { home, blog }
        }
        (Some(home), None) => {
            output::line("Configuring page settings...");
            let home_id = home.to_string();
            let ok = [
                wp.option_update("page_on_front", &home_id),
                wp.option_update("show_on_front", "page"),
            ]
            .iter()
            .all(|o| o.success());
            if ok {
                output::success(format!("Set home page (ID: {})", home));
            }
            PageWiring::HomeOnly { home }
        }
        (None, Some(_)) => {
            output::line("Found a blog page but no home page, keeping default reading settings");
            PageWiring::Unchanged
        }
        (None, None) => {
            output::line("No home or blog pages found, using default WordPress settings");
            PageWiring::Unchanged
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::command::testing::ScriptedRunner;
    use crate::runtime::command::CommandOutput;

    const LIST: &str = "wp post list --post_type=page --format=json";

    fn page(id: u64, title: &str, slug: &str) -> PageRecord {
        PageRecord {
            id,
            post_title: title.to_string(),
            post_name: slug.to_string(),
        }
    }

    #[test]
    fn test_matches_slug_or_title() {
        let pages = vec![
            page(2, "Sample Page", "sample-page"),
            page(5, "Welcome", "homepage"),
            page(6, "News", "latest"),
            page(7, "Home", "home-2"),
            page(8, "Blog", "blog"),
        ];
        assert_eq!(find_front_and_blog(&pages), (Some(5), Some(6)));
        assert_eq!(find_front_and_blog(&[]), (None, None));
    }

    #[test]
    fn test_wires_home_and_blog() {
        let runner = ScriptedRunner::new();
        runner.on(
            LIST,
            CommandOutput::ok(
                r#"[{"ID":4,"post_title":"Home","post_name":"home"},{"ID":9,"post_title":"Blog","post_name":"blog"}]"#,
            ),
        );
        let wp = WpCli::new(&runner, vec!["wp".into()]);

        assert_eq!(wire_pages(&wp), PageWiring::HomeAndBlog { home: 4, blog: 9 });
        assert!(runner.called("wp option update page_for_posts 9"));
        assert!(runner.called("wp option update page_on_front 4"));
        assert!(runner.called("wp option update show_on_front page"));
    }

    #[test]
    fn test_wires_home_only() {
        let runner = ScriptedRunner::new();
        runner.on(
            LIST,
            CommandOutput::ok(r#"[{"ID":4,"post_title":"Homepage","post_name":"start"}]"#),
        );
        let wp = WpCli::new(&runner, vec!["wp".into()]);

        assert_eq!(wire_pages(&wp), PageWiring::HomeOnly { home: 4 });
        assert!(!runner.calls().iter().any(|c| c.contains("page_for_posts")));
    }

    #[test]
    fn test_blog_only_keeps_defaults() {
        let runner = ScriptedRunner::new();
        runner.on(
            LIST,
            CommandOutput::ok(r#"[{"ID":9,"post_title":"News","post_name":"news"}]"#),
        );
        let wp = WpCli::new(&runner, vec!["wp".into()]);

        assert_eq!(wire_pages(&wp), PageWiring::Unchanged);
        assert_eq!(runner.calls().len(), 1);
    }

    #[test]
    fn test_unparseable_list_is_not_fatal() {
        let runner = ScriptedRunner::new();
        runner.on(LIST, CommandOutput::ok("Warning: something\n[]"));
        let wp = WpCli::new(&runner, vec!["wp".into()]);
        assert_eq!(wire_pages(&wp), PageWiring::Unchanged);
    }
}
