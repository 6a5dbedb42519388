pub(crate) mod transform;
pub(crate) mod usb_hiddev;
