//! Device icons.
//!
//! Icons are plain path data with their own view box. They are drawn with
//! `currentColor` so the surrounding group decides the tint.

use shumoku_core::{
    geometry::Size,
    model::{DeviceInfo, DeviceType},
};

/// A single-path vector icon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Icon {
    /// Size of the coordinate space `body` is drawn in.
    pub view_box: Size,
    /// SVG path data.
    pub body: &'static str,
}

impl Icon {
    pub const fn new(width: f32, height: f32, body: &'static str) -> Self {
        Self {
            view_box: Size::new(width, height),
            body,
        }
    }
}

/// Resolves the icon drawn for a device.
///
/// Implementations may look at vendor and model; the default resolution
/// only uses the device type.
pub trait IconProvider {
    fn icon_for(&self, device_type: DeviceType) -> Option<Icon>;

    fn device_icon(&self, device: &DeviceInfo) -> Option<Icon> {
        device.device_type.and_then(|device_type| self.icon_for(device_type))
    }
}

/// The icon set shipped with the renderer.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinIcons;

const ROUTER: Icon = Icon::new(
    24.0,
    24.0,
    "M12 2a10 10 0 1 0 0 20a10 10 0 1 0 0-20Zm0 3l3 3h-2v3h-2V8H9Zm0 14l-3-3h2v-3h2v3h2Z\
     M5 12l3-3v2h3v2H8v2Zm14 0l-3 3v-2h-3v-2h3V9Z",
);
const L3_SWITCH: Icon = Icon::new(
    32.0,
    20.0,
    "M2 4h28v12H2Zm4 3h20v2H6Zm0 4h20v2H6ZM8 0h16v3H8Z",
);
const L2_SWITCH: Icon = Icon::new(
    32.0,
    16.0,
    "M2 2h28v12H2Zm4 3h20v2H6Zm0 4h20v2H6Z",
);
const FIREWALL: Icon = Icon::new(
    24.0,
    24.0,
    "M2 3h20v18H2Zm2 2v4h7V5Zm9 0v4h7V5ZM4 11v4h4v-4Zm6 0v4h7v-4Zm9 0v4h1v-4ZM4 17v2h7v-2Zm9 0v2h7v-2Z",
);
const LOAD_BALANCER: Icon = Icon::new(
    28.0,
    24.0,
    "M2 10h6l6-6h6V1l6 4l-6 4V6h-5l-5 5v2l5 5h5v-3l6 4l-6 4v-3h-6l-6-6H2Z",
);
const SERVER: Icon = Icon::new(
    20.0,
    24.0,
    "M2 1h16v10H2Zm0 12h16v10H2ZM5 4v4h2V4Zm0 12v4h2v-4Zm6-10v2h5V6Zm0 12v2h5v-2Z",
);
const ACCESS_POINT: Icon = Icon::new(
    24.0,
    24.0,
    "M12 14a2 2 0 1 0 0 4a2 2 0 1 0 0-4ZM6.3 10.3l1.4 1.4a6 6 0 0 1 8.6 0l1.4-1.4a8 8 0 0 0-11.4 0Z\
     M3.5 7.5l1.4 1.4a10 10 0 0 1 14.2 0l1.4-1.4a12 12 0 0 0-17 0ZM11 18h2v5h-2Z",
);
const CLOUD: Icon = Icon::new(
    32.0,
    20.0,
    "M8 19a7 7 0 0 1-1-13.9A9 9 0 0 1 24 6a6.5 6.5 0 0 1 1 13Z",
);
const INTERNET: Icon = Icon::new(
    24.0,
    24.0,
    "M12 1a11 11 0 1 0 0 22a11 11 0 1 0 0-22Zm0 2c1.5 1.8 2.5 4.8 2.7 8H9.3C9.5 7.8 10.5 4.8 12 3Z\
     M3.1 11A9 9 0 0 1 8 3.8A17 17 0 0 0 7.3 11Zm13.6 0A17 17 0 0 0 16 3.8a9 9 0 0 1 4.9 7.2Z\
     M3.1 13h4.2A17 17 0 0 0 8 20.2A9 9 0 0 1 3.1 13Zm6.2 0h5.4c-.2 3.2-1.2 6.2-2.7 8c-1.5-1.8-2.5-4.8-2.7-8Z\
     M16.7 13h4.2a9 9 0 0 1-4.9 7.2a17 17 0 0 0 .7-7.2Z",
);
const VPN: Icon = Icon::new(
    20.0,
    24.0,
    "M10 1a6 6 0 0 0-6 6v3H2v13h16V10h-2V7a6 6 0 0 0-6-6Zm0 2a4 4 0 0 1 4 4v3H6V7a4 4 0 0 1 4-4Z\
     M9 14h2v5H9Z",
);
const DATABASE: Icon = Icon::new(
    20.0,
    24.0,
    "M10 1C5 1 1 2.8 1 5v14c0 2.2 4 4 9 4s9-1.8 9-4V5c0-2.2-4-4-9-4Zm0 2c4.4 0 7 1.4 7 2s-2.6 2-7 2s-7-1.4-7-2s2.6-2 7-2Z",
);
const GENERIC: Icon = Icon::new(
    24.0,
    24.0,
    "M3 3h18v18H3Zm2 2v14h14V5Z",
);

impl IconProvider for BuiltinIcons {
    fn icon_for(&self, device_type: DeviceType) -> Option<Icon> {
        let icon = match device_type {
            DeviceType::Router => ROUTER,
            DeviceType::L3Switch => L3_SWITCH,
            DeviceType::L2Switch => L2_SWITCH,
            DeviceType::Firewall => FIREWALL,
            DeviceType::LoadBalancer => LOAD_BALANCER,
            DeviceType::Server => SERVER,
            DeviceType::AccessPoint => ACCESS_POINT,
            DeviceType::Cloud => CLOUD,
            DeviceType::Internet => INTERNET,
            DeviceType::Vpn => VPN,
            DeviceType::Database => DATABASE,
            DeviceType::Generic => GENERIC,
        };
        Some(icon)
    }
}

/// Draw size for an icon: `height` tall unless that would exceed
/// `max_width`, in which case the width is capped and the height follows.
pub(crate) fn fit_icon(icon: &Icon, height: f32, max_width: f32) -> Size {
    let aspect = icon.view_box.aspect_ratio();
    if !aspect.is_finite() || aspect <= 0.0 {
        return Size::new(height.min(max_width), height.min(max_width));
    }
    let width = height * aspect;
    if width <= max_width {
        Size::new(width, height)
    } else {
        Size::new(max_width, max_width / aspect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn test_every_device_type_has_builtin_icon() {
        let all = [
            DeviceType::Router,
            DeviceType::L3Switch,
            DeviceType::L2Switch,
            DeviceType::Firewall,
            DeviceType::LoadBalancer,
            DeviceType::Server,
            DeviceType::AccessPoint,
            DeviceType::Cloud,
            DeviceType::Internet,
            DeviceType::Vpn,
            DeviceType::Database,
            DeviceType::Generic,
        ];
        for device_type in all {
            let icon = BuiltinIcons.icon_for(device_type);
            assert!(icon.is_some_and(|icon| !icon.body.is_empty()), "{device_type:?}");
        }
    }

    #[test]
    fn test_device_icon_requires_type() {
        assert!(BuiltinIcons.device_icon(&DeviceInfo::default()).is_none());
    }

    #[test]
    fn test_fit_icon_preserves_aspect_ratio() {
        // 32x16 is twice as wide as tall.
        let size = fit_icon(&L2_SWITCH, 36.0, 160.0);
        assert_approx_eq!(f32, size.width(), 72.0);
        assert_approx_eq!(f32, size.height(), 36.0);

        let capped = fit_icon(&L2_SWITCH, 36.0, 40.0);
        assert_approx_eq!(f32, capped.width(), 40.0);
        assert_approx_eq!(f32, capped.height(), 20.0);
    }
}
