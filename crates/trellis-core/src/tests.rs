#[cfg(test)]
mod tests {
    use crate::*;
    use std::rc::Rc;

    fn button_theme() -> Theme {
        Theme::new().with_style(
            "button",
            "default",
            StyleBag::new()
                .colour("fill", Color::gray(75))
                .colour("stroke", Color::gray(0))
                .modifier("hover", StyleBag::new().colour("fill", Color::gray(100))),
        )
    }

    #[test]
    fn test_color_hex() {
        assert_eq!(Color::parse_hex("#ff8000"), Some(Color(255, 128, 0, 255)));
        assert_eq!(Color::parse_hex("ff800080"), Some(Color(255, 128, 0, 128)));
        assert_eq!(Color::parse_hex("#ff80"), None);
        assert_eq!(Color::parse_hex("#gg0000"), None);
        assert_eq!(Color::from_hex("nope"), Color::BLACK);
    }

    #[test]
    fn test_color_json_spellings() {
        let colours: Vec<Color> =
            serde_json::from_str(r##"["#102030", 75, [75, 128], [1, 2, 3], [1, 2, 3, 4]]"##).unwrap();
        assert_eq!(
            colours,
            vec![
                Color::from_rgb(16, 32, 48),
                Color::gray(75),
                Color::gray_alpha(75, 128),
                Color::from_rgb(1, 2, 3),
                Color(1, 2, 3, 4),
            ]
        );
        assert!(serde_json::from_str::<Color>("[1, 2, 3, 4, 5]").is_err());
    }

    #[test]
    fn test_style_modifier_fallback() {
        let theme = button_theme();
        let style = Style::from(theme.resolve("button", "default").unwrap());

        assert_eq!(style.colour("fill"), Some(Color::gray(75)));
        assert_eq!(style.colour_in("fill", "hover"), Some(Color::gray(100)));
        // Modifier without the key falls back to base.
        assert_eq!(style.colour_in("stroke", "hover"), Some(Color::gray(0)));
        assert_eq!(style.colour_in("fill", "pressed"), Some(Color::gray(75)));
    }

    #[test]
    fn test_style_strict_lookup_never_returns_base() {
        let theme = button_theme();
        let style = Style::from(theme.resolve("button", "default").unwrap());

        assert_eq!(style.colour_only_in("stroke", "hover"), None);
        assert_eq!(style.colour_only_in("fill", "checked"), None);
        assert_eq!(style.colour_only_in("fill", "hover"), Some(Color::gray(100)));
    }

    #[test]
    fn test_style_unresolved_is_no_colour() {
        let style = Style::none();
        assert!(!style.is_resolved());
        assert_eq!(style.colour("fill"), None);
        assert_eq!(style.colour_if("fill", "hover", true), None);
    }

    #[test]
    fn test_theme_resolve_unknown() {
        let theme = button_theme();
        assert!(theme.resolve("slider", "default").unwrap().is_none());
        assert!(matches!(
            theme.resolve("button", "fancy"),
            Err(UiError::UnknownStyle { .. })
        ));
    }

    #[test]
    fn test_theme_resolve_is_pure() {
        let theme = button_theme();
        let a = theme.resolve("button", "default").unwrap().unwrap();
        let b = theme.resolve("button", "default").unwrap().unwrap();
        assert!(Rc::ptr_eq(&a, &b));
        assert_eq!(theme, button_theme());
    }

    #[test]
    fn test_theme_from_json() {
        let theme = Theme::from_json(
            r##"{
                "checkbox": {
                    "default": {
                        "fill": 40,
                        "tick": "#ffffff",
                        "checked": { "fill": [0, 120, 0] },
                        "hoverchecked": { "fill": [0, 160, 0] }
                    }
                }
            }"##,
        )
        .unwrap();
        let style = Style::from(theme.resolve("checkbox", "default").unwrap());
        assert_eq!(style.colour("tick"), Some(Color::WHITE));
        assert_eq!(
            style.colour_only_in("fill", "hoverchecked"),
            Some(Color::from_rgb(0, 160, 0))
        );

        assert!(matches!(
            Theme::from_json("{\"button\": 3}"),
            Err(UiError::InvalidTheme(_))
        ));
    }

    #[test]
    fn test_view_fit_wide_window() {
        let view = ViewTransform::fit(Size::new(2000.0, 600.0), Size::new(900.0, 600.0), 0.9);
        assert!((view.zoom - 0.9).abs() < 1e-6);
        assert!((view.offset.x - (2000.0 - 810.0) / 2.0).abs() < 1e-3);
        assert!((view.offset.y - 30.0).abs() < 1e-3);

        let p = view.to_canvas(view.to_window(Vec2::new(450.0, 300.0)));
        assert!((p.x - 450.0).abs() < 1e-3 && (p.y - 300.0).abs() < 1e-3);
    }

    #[test]
    fn test_view_fit_tall_window() {
        let view = ViewTransform::fit(Size::new(450.0, 1000.0), Size::new(900.0, 600.0), 1.0);
        assert!((view.zoom - 0.5).abs() < 1e-6);
        assert_eq!(view.offset, Vec2::new(0.0, 350.0));
        assert!(view.covers(Size::new(450.0, 1000.0), Vec2::new(10.0, 400.0)));
        assert!(!view.covers(Size::new(450.0, 1000.0), Vec2::new(10.0, 100.0)));
    }

    #[test]
    fn test_config_json() {
        let config = UiConfig::from_json(r#"{ "width": 1280, "height": 720, "tooltip_delay": 10 }"#)
            .unwrap();
        assert_eq!(config.canvas(), Size::new(1280.0, 720.0));
        assert_eq!(config.tooltip_delay, 10);
        assert_eq!(config.buffer, 0.9);

        assert!(matches!(
            UiConfig::from_json(r#"{ "colour": 1 }"#),
            Err(UiError::InvalidConfig(_))
        ));
        assert!(matches!(
            UiConfig::from_json(r#"{ "buffer": 0 }"#),
            Err(UiError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_monospace_measure() {
        let m = MonospaceMeasure::default();
        assert_eq!(m.text_width("abcd", 10.0), 20.0);
        assert_eq!(m.text_width("", 10.0), 0.0);
    }

    #[test]
    fn test_memory_clipboard_deferred_reads() {
        let cb = MemoryClipboard::deferred();
        let mut boxed: Box<dyn Clipboard> = Box::new(cb.clone());
        boxed.write_text("copied");
        assert_eq!(cb.contents(), "copied");

        let mut first = boxed.read_text();
        assert_eq!(first.try_recv(), Ok(None));
        assert_eq!(cb.pending_reads(), 1);
        cb.complete_reads();
        assert_eq!(first.try_recv(), Ok(Some("copied".to_string())));

        let mut second = boxed.read_text();
        cb.fail_reads();
        assert!(second.try_recv().is_err());
    }

    #[test]
    fn test_lookup_error_messages() {
        assert_eq!(UiError::UnknownScreen("lobby".into()).to_string(), "screen 'lobby' does not exist");
        assert_eq!(UiError::UnknownLabel("chat".into()).to_string(), "no element is labelled 'chat'");
        assert_eq!(UiError::UnknownTheme("neon".into()).to_string(), "theme 'neon' does not exist");
        let style = UiError::UnknownStyle { kind: "button".into(), style: "big".into() };
        assert_eq!(style.to_string(), "style 'big' does not exist for button element");
    }
}
