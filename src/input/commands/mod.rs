//! Built-in commands
//!
//! Each command lives in its own module and is registered under its name by
//! [`register_all`]. Commands get the shared handles they need from the
//! [`AppModel`] once, at registration.

mod add;
mod bind;
mod clipboard;
mod cursor;
mod inputmode;
mod isolate;
mod list;
mod play;
mod print;
mod seek;
mod select;
mod session;
mod set;
mod sort;
mod style;
mod transport;
mod volume;

use std::rc::Rc;

use crate::input::dispatcher::{Dispatcher, RegistryError};
use crate::model::AppModel;

pub use transport::Transport;

pub fn register_all(dispatcher: &mut Dispatcher, model: &AppModel) -> Result<(), RegistryError> {
    let transport = |action| Box::new(transport::TransportCommand::new(model.player.clone(), action));

    dispatcher.register("set", Box::new(set::Set::new(Rc::clone(&model.options))))?;
    dispatcher.register("style", Box::new(style::Style::new(Rc::clone(&model.styles))))?;
    dispatcher.register("bind", Box::new(bind::Bind::new(Rc::clone(&model.bindings))))?;
    dispatcher.register("unbind", Box::new(bind::Unbind::new(Rc::clone(&model.bindings))))?;
    dispatcher.register(
        "play",
        Box::new(play::Play::new(Rc::clone(&model.songlists), model.player.clone())),
    )?;
    dispatcher.register("pause", transport(Transport::Pause))?;
    dispatcher.register("stop", transport(Transport::Stop))?;
    dispatcher.register("next", transport(Transport::Next))?;
    dispatcher.register("previous", transport(Transport::Previous))?;
    dispatcher.register("volume", Box::new(volume::Volume::new(model.player.clone())))?;
    dispatcher.register("seek", Box::new(seek::Seek::new(model.player.clone())))?;
    dispatcher.register("cursor", Box::new(cursor::Cursor::new(Rc::clone(&model.songlists))))?;
    dispatcher.register(
        "inputmode",
        Box::new(inputmode::InputMode::new(Rc::clone(&model.ui))),
    )?;
    dispatcher.register("list", Box::new(list::List::new(Rc::clone(&model.songlists))))?;
    dispatcher.register(
        "sort",
        Box::new(sort::Sort::new(
            Rc::clone(&model.songlists),
            Rc::clone(&model.options),
        )),
    )?;
    dispatcher.register(
        "add",
        Box::new(add::Add::new(
            Rc::clone(&model.songlists),
            Rc::clone(&model.ui),
            model.player.clone(),
        )),
    )?;
    dispatcher.register("select", Box::new(select::Select::new(Rc::clone(&model.songlists))))?;
    dispatcher.register(
        "cut",
        Box::new(clipboard::Cut::new(
            Rc::clone(&model.songlists),
            Rc::clone(&model.ui),
            model.player.clone(),
        )),
    )?;
    dispatcher.register(
        "yank",
        Box::new(clipboard::Yank::new(Rc::clone(&model.songlists), Rc::clone(&model.ui))),
    )?;
    dispatcher.register(
        "paste",
        Box::new(clipboard::Paste::new(
            Rc::clone(&model.songlists),
            Rc::clone(&model.ui),
            model.player.clone(),
        )),
    )?;
    dispatcher.register(
        "isolate",
        Box::new(isolate::Isolate::new(
            Rc::clone(&model.songlists),
            Rc::clone(&model.options),
        )),
    )?;
    dispatcher.register(
        "print",
        Box::new(print::Print::new(Rc::clone(&model.songlists), Rc::clone(&model.ui))),
    )?;
    dispatcher.register("redraw", Box::new(session::Redraw::new(Rc::clone(&model.ui))))?;
    dispatcher.register("quit", Box::new(session::Quit::new(Rc::clone(&model.ui))))?;

    tracing::debug!(count = dispatcher.names().len(), "Commands registered");
    Ok(())
}
