use askama::Template;
use layers::ACCENT_HEX;

/// Static stand-in shown when no live map can be produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fallback {
    pub pattern_id: String,
    pub label: Option<String>,
}

#[derive(Template)]
#[template(
    source = r##"<div class="map-fallback">
  <div class="map-fallback-pattern">
    <svg viewBox="0 0 100 100" preserveAspectRatio="xMidYMid slice" aria-hidden="true">
      <defs>
        <pattern id="{{ pattern_id }}" width="10" height="10" patternUnits="userSpaceOnUse">
          <path d="M 10 0 L 0 0 0 10" fill="none" stroke="{{ accent }}" stroke-width="0.3"/>
        </pattern>
      </defs>
      <rect width="100" height="100" fill="url(#{{ pattern_id }})"/>
      <circle cx="50" cy="50" r="3" fill="{{ accent }}" opacity="0.8"/>
    </svg>
  </div>
  {%- match label %}
  {%- when Some with (text) %}
  <span class="map-fallback-label">{{ text }}</span>
  {%- when None %}
  {%- endmatch %}
</div>"##,
    ext = "html"
)]
struct FallbackTemplate<'a> {
    pattern_id: &'a str,
    accent: &'a str,
    label: Option<&'a str>,
}

impl Fallback {
    pub fn new(key: &str, label: Option<&str>) -> Self {
        Self {
            pattern_id: format!("grid-{key}"),
            label: label.map(str::to_string),
        }
    }

    pub fn render(&self) -> Result<String, askama::Error> {
        FallbackTemplate {
            pattern_id: &self.pattern_id,
            accent: ACCENT_HEX,
            label: self.label.as_deref(),
        }
        .render()
    }
}
