/// One banner entry. `image_url` is a local path or an http(s) URL; an
/// empty string means the record carried no image and the placeholder is
/// drawn instead. Records are parsed by `api::normalize_slides`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Slide {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub image_url: String,
}

impl Slide {
    pub fn new(image_url: impl Into<String>) -> Self {
        Self {
            title: None,
            subtitle: None,
            image_url: image_url.into(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn has_image(&self) -> bool {
        !self.image_url.trim().is_empty()
    }

    /// Heading text, falling back to the banner's fallback title.
    pub fn heading<'a>(&'a self, fallback_title: &'a str) -> &'a str {
        non_blank(self.title.as_deref()).unwrap_or(fallback_title)
    }

    /// Subtitle text; `None` when the slide has none worth drawing.
    pub fn caption(&self) -> Option<&str> {
        non_blank(self.subtitle.as_deref())
    }
}

fn non_blank(text: Option<&str>) -> Option<&str> {
    text.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_falls_back_when_title_missing_or_blank() {
        let slide = Slide::new("a.png");
        assert_eq!(slide.heading("Banner"), "Banner");

        let blank = Slide::new("a.png").with_title("   ");
        assert_eq!(blank.heading("Banner"), "Banner");

        let titled = Slide::new("a.png").with_title("Cloud ERP");
        assert_eq!(titled.heading("Banner"), "Cloud ERP");
    }

    #[test]
    fn caption_is_omitted_when_absent() {
        assert_eq!(Slide::new("a.png").caption(), None);
        assert_eq!(
            Slide::new("a.png").with_subtitle(" Fast onboarding ").caption(),
            Some("Fast onboarding")
        );
    }

    #[test]
    fn missing_image_is_reported() {
        assert!(!Slide::new("").has_image());
        assert!(!Slide::new("   ").with_title("No art").has_image());
        assert!(Slide::new("a.png").has_image());
    }
}
