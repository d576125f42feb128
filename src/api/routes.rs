use actix_web::web;

use crate::api::handlers::{
    editor::{
        add_column, add_row, apply_selection, cancel_form, cancel_selection, get_garden,
        remove_column, remove_row, reset_zoom, set_selection_mode, set_zoom, submit_form, undo,
        zoom_in, zoom_out,
    },
    pointer::{pointer_down, pointer_leave, pointer_move, pointer_up},
};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(get_garden)
            .service(pointer_down)
            .service(pointer_move)
            .service(pointer_up)
            .service(pointer_leave)
            .service(set_selection_mode)
            .service(apply_selection)
            .service(cancel_selection)
            .service(submit_form)
            .service(cancel_form)
            .service(undo)
            .service(add_row)
            .service(remove_row)
            .service(add_column)
            .service(remove_column)
            .service(zoom_in)
            .service(zoom_out)
            .service(reset_zoom)
            .service(set_zoom),
    );
}
