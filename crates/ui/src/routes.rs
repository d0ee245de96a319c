use url::Url;
use url::form_urlencoded;

/// Screens of the application and their paths.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    /// `/`: topic selection.
    Home,
    /// `/parcours/new?slug=<id>`: generate and display a course.
    Generate { slug: Option<String> },
    /// `/parcours/<slug>`: pre-built course viewer.
    Course { slug: String },
}

const COURSE_PREFIX: &str = "/parcours/";
const GENERATE_PATH: &str = "/parcours/new";

impl Route {
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Generate { slug: None } => GENERATE_PATH.to_string(),
            Self::Generate { slug: Some(slug) } => {
                let query = form_urlencoded::Serializer::new(String::new())
                    .append_pair("slug", slug)
                    .finish();
                format!("{GENERATE_PATH}?{query}")
            }
            Self::Course { slug } => format!("{COURSE_PREFIX}{slug}"),
        }
    }

    /// Resolve a path (with optional query) to a route.
    ///
    /// `/parcours/new` always means generation, never a course named `new`.
    #[must_use]
    pub fn parse(path: &str) -> Option<Self> {
        let url = Url::parse("http://localhost").ok()?.join(path).ok()?;
        match url.path() {
            "/" => Some(Self::Home),
            GENERATE_PATH => {
                let slug = url
                    .query_pairs()
                    .find(|(key, _)| key == "slug")
                    .map(|(_, value)| value.into_owned())
                    .filter(|value| !value.is_empty());
                Some(Self::Generate { slug })
            }
            other => other
                .strip_prefix(COURSE_PREFIX)
                .filter(|slug| !slug.is_empty() && !slug.contains('/'))
                .map(|slug| Self::Course {
                    slug: slug.to_string(),
                }),
        }
    }
}
