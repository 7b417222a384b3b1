pub mod draw_list;
pub mod surface;
pub mod field_vis2d;
pub mod field_vis3d;
