//! Viewport breakpoints and platform detection

use serde::{Deserialize, Serialize};
use std::fmt;

/// Named viewport widths, smallest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    Xs,
    Sm,
    Md,
    Lg,
    Xl,
    Xxl,
}

impl Breakpoint {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Xs => "xs",
            Self::Sm => "sm",
            Self::Md => "md",
            Self::Lg => "lg",
            Self::Xl => "xl",
            Self::Xxl => "xxl",
        }
    }
}

impl fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lower bound in pixels of each breakpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thresholds {
    pub xs: u32,
    pub sm: u32,
    pub md: u32,
    pub lg: u32,
    pub xl: u32,
    pub xxl: u32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            xs: 0,
            sm: 640,
            md: 768,
            lg: 1024,
            xl: 1280,
            xxl: 1536,
        }
    }
}

impl Thresholds {
    pub const fn get(&self, breakpoint: Breakpoint) -> u32 {
        match breakpoint {
            Breakpoint::Xs => self.xs,
            Breakpoint::Sm => self.sm,
            Breakpoint::Md => self.md,
            Breakpoint::Lg => self.lg,
            Breakpoint::Xl => self.xl,
            Breakpoint::Xxl => self.xxl,
        }
    }
}

/// Width below which the layout counts as mobile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MobileBreakpoint {
    Named(Breakpoint),
    Pixels(u32),
}

impl Default for MobileBreakpoint {
    fn default() -> Self {
        Self::Named(Breakpoint::Md)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayOptions {
    pub thresholds: Thresholds,
    pub mobile_breakpoint: MobileBreakpoint,
    /// Component name used as the prefix of [`Display::display_classes`]
    pub name: Option<String>,
}

/// Viewport size classified against breakpoints
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Display {
    width: u32,
    height: u32,
    options: DisplayOptions,
}

impl Display {
    pub const fn new(options: DisplayOptions) -> Self {
        Self {
            width: 0,
            height: 0,
            options,
        }
    }

    /// Record a new viewport size (on mount and on every resize)
    pub const fn update(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    pub const fn width(&self) -> u32 {
        self.width
    }

    pub const fn height(&self) -> u32 {
        self.height
    }

    pub const fn thresholds(&self) -> &Thresholds {
        &self.options.thresholds
    }

    pub fn breakpoint(&self) -> Breakpoint {
        let t = &self.options.thresholds;
        match self.width {
            w if w < t.sm => Breakpoint::Xs,
            w if w < t.md => Breakpoint::Sm,
            w if w < t.lg => Breakpoint::Md,
            w if w < t.xl => Breakpoint::Lg,
            w if w < t.xxl => Breakpoint::Xl,
            _ => Breakpoint::Xxl,
        }
    }

    /// Name of the current breakpoint
    pub fn name(&self) -> &'static str {
        self.breakpoint().as_str()
    }

    pub fn is(&self, breakpoint: Breakpoint) -> bool {
        self.breakpoint() == breakpoint
    }

    /// At or below `breakpoint`
    pub fn and_down(&self, breakpoint: Breakpoint) -> bool {
        self.breakpoint() <= breakpoint
    }

    /// At or above `breakpoint`
    pub fn and_up(&self, breakpoint: Breakpoint) -> bool {
        self.breakpoint() >= breakpoint
    }

    pub fn sm_and_down(&self) -> bool {
        self.and_down(Breakpoint::Sm)
    }

    pub fn sm_and_up(&self) -> bool {
        self.and_up(Breakpoint::Sm)
    }

    pub fn md_and_down(&self) -> bool {
        self.and_down(Breakpoint::Md)
    }

    pub fn md_and_up(&self) -> bool {
        self.and_up(Breakpoint::Md)
    }

    pub fn lg_and_down(&self) -> bool {
        self.and_down(Breakpoint::Lg)
    }

    pub fn lg_and_up(&self) -> bool {
        self.and_up(Breakpoint::Lg)
    }

    pub fn xl_and_down(&self) -> bool {
        self.and_down(Breakpoint::Xl)
    }

    pub fn xl_and_up(&self) -> bool {
        self.and_up(Breakpoint::Xl)
    }

    pub const fn mobile(&self) -> bool {
        let limit = match self.options.mobile_breakpoint {
            MobileBreakpoint::Named(breakpoint) => self.options.thresholds.get(breakpoint),
            MobileBreakpoint::Pixels(pixels) => pixels,
        };
        self.width < limit
    }

    /// `{name}--mobile` (when mobile) and `{name}--{breakpoint}`; empty
    /// without a component name
    pub fn display_classes(&self) -> Vec<String> {
        let Some(name) = &self.options.name else {
            return Vec::new();
        };
        let mut classes = Vec::with_capacity(2);
        if self.mobile() {
            classes.push(format!("{name}--mobile"));
        }
        classes.push(format!("{name}--{}", self.name()));
        classes
    }
}

impl Default for Display {
    fn default() -> Self {
        Self::new(DisplayOptions::default())
    }
}

/// Host platform flags derived from the user agent
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct Platform {
    pub android: bool,
    pub ios: bool,
    pub cordova: bool,
    pub electron: bool,
    pub chrome: bool,
    pub edge: bool,
    pub firefox: bool,
    pub opera: bool,
    pub win: bool,
    pub mac: bool,
    pub linux: bool,
    pub touch: bool,
    pub ssr: bool,
}

impl Platform {
    /// Substring matches on the lowercased user agent. `touch` and `cordova`
    /// come from window feature checks the caller performs.
    pub fn detect(user_agent: &str, touch: bool, cordova: bool) -> Self {
        let ua = user_agent.to_lowercase();
        let has = |needle: &str| ua.contains(needle);
        Self {
            android: has("android"),
            ios: has("iphone") || has("ipad") || has("ipod"),
            cordova,
            electron: has("electron"),
            chrome: has("chrome"),
            edge: has("edge"),
            firefox: has("firefox"),
            opera: has("opera"),
            win: has("win"),
            mac: has("mac"),
            linux: has("linux"),
            touch,
            ssr: false,
        }
    }

    /// Rendering without a window
    pub fn server_side() -> Self {
        Self {
            ssr: true,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(width: u32) -> Display {
        let mut display = Display::default();
        display.update(width, 800);
        display
    }

    #[test]
    fn breakpoints_use_lower_bounds() {
        assert_eq!(at(0).name(), "xs");
        assert_eq!(at(639).name(), "xs");
        assert_eq!(at(640).name(), "sm");
        assert_eq!(at(768).name(), "md");
        assert_eq!(at(1023).name(), "md");
        assert_eq!(at(1280).name(), "xl");
        assert_eq!(at(4000).name(), "xxl");
    }

    #[test]
    fn composites() {
        let display = at(800);
        assert!(display.md_and_up());
        assert!(display.md_and_down());
        assert!(!display.sm_and_down());
        assert!(display.sm_and_up());
        assert!(!display.lg_and_up());
        assert!(display.xl_and_down());
    }

    #[test]
    fn mobile_defaults_to_md() {
        assert!(at(767).mobile());
        assert!(!at(768).mobile());

        let mut display = Display::new(DisplayOptions {
            mobile_breakpoint: MobileBreakpoint::Pixels(1000),
            ..DisplayOptions::default()
        });
        display.update(900, 600);
        assert!(display.mobile());
    }

    #[test]
    fn display_classes_need_a_name() {
        assert!(at(300).display_classes().is_empty());

        let mut display = Display::new(DisplayOptions {
            name: Some("sidebar".into()),
            ..DisplayOptions::default()
        });
        display.update(300, 600);
        assert_eq!(
            display.display_classes(),
            vec!["sidebar--mobile".to_string(), "sidebar--xs".to_string()]
        );
        display.update(1100, 600);
        assert_eq!(display.display_classes(), vec!["sidebar--lg".to_string()]);
    }

    #[test]
    fn platform_from_user_agent() {
        let platform = Platform::detect(
            "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 Chrome/126.0 Mobile Safari/537.36",
            true,
            false,
        );
        assert!(platform.android && platform.linux && platform.chrome && platform.touch);
        assert!(!platform.ios && !platform.firefox && !platform.ssr);

        assert!(Platform::server_side().ssr);
    }
}
