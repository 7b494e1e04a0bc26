use dioxus::prelude::*;
use video_annotator::constants::*;
use video_annotator::state::Category;

/// Category picker shared by the add form and the edit modal.
#[component]
pub fn CategorySelect(value: Category, on_change: EventHandler<Category>) -> Element {
    rsx! {
        select {
            style: "
                padding: 6px 8px; font-size: 12px;
                background-color: {BG_SURFACE}; color: {TEXT_PRIMARY};
                border: 1px solid {BORDER_DEFAULT}; border-radius: 4px; outline: none;
            ",
            value: "{value.label()}",
            onchange: move |e| on_change.call(Category::from_label_or_other(&e.value())),
            for category in Category::ALL {
                option {
                    key: "{category.label()}",
                    value: "{category.label()}",
                    selected: category == value,
                    "{category.label()}"
                }
            }
        }
    }
}

#[component]
pub fn TextInput(
    label: &'static str,
    value: String,
    on_input: EventHandler<String>,
    #[props(default)] on_enter: Option<EventHandler<()>>,
) -> Element {
    rsx! {
        div {
            style: "display: flex; flex-direction: column; gap: 4px; min-width: 0; flex: 1;",
            span { style: "font-size: 10px; color: {TEXT_MUTED};", "{label}" }
            input {
                r#type: "text",
                value: "{value}",
                style: "
                    width: 100%; min-width: 0; box-sizing: border-box;
                    padding: 6px 8px; font-size: 12px;
                    background-color: {BG_SURFACE}; color: {TEXT_PRIMARY};
                    border: 1px solid {BORDER_DEFAULT}; border-radius: 4px;
                    outline: none;
                    user-select: text;
                ",
                oninput: move |e| on_input.call(e.value()),
                onkeydown: move |e: KeyboardEvent| {
                    // Typing must not trigger transport hotkeys.
                    e.stop_propagation();
                    if e.key() == Key::Enter {
                        if let Some(handler) = on_enter {
                            handler.call(());
                        }
                    }
                },
            }
        }
    }
}

/// Add-annotation form. Submitting clears the text fields on success only,
/// which the parent signals by bumping `reset_token`.
#[component]
pub fn AnnotationForm(
    reset_token: u64,
    on_submit: EventHandler<(Category, String, String)>,
) -> Element {
    let mut category = use_signal(Category::default);
    let mut text = use_signal(String::new);
    let mut comment = use_signal(String::new);
    let mut last_reset = use_signal(|| reset_token);

    use_effect(move || {
        if reset_token != last_reset() {
            text.set(String::new());
            comment.set(String::new());
            last_reset.set(reset_token);
        }
    });

    let submit = move || on_submit.call((category(), text(), comment()));

    rsx! {
        div {
            style: "display: flex; flex-direction: column; gap: 8px; padding: 12px; background-color: {BG_ELEVATED}; border: 1px solid {BORDER_SUBTLE}; border-radius: 6px;",
            div {
                style: "font-size: 10px; color: {TEXT_DIM}; text-transform: uppercase; letter-spacing: 0.5px;",
                "New Annotation"
            }
            div {
                style: "display: flex; align-items: flex-end; gap: 8px;",
                div {
                    style: "display: flex; flex-direction: column; gap: 4px;",
                    span { style: "font-size: 10px; color: {TEXT_MUTED};", "Category" }
                    CategorySelect { value: category(), on_change: move |value| category.set(value) }
                }
                TextInput {
                    label: "Annotation",
                    value: text(),
                    on_input: move |value| text.set(value),
                    on_enter: move |_| submit(),
                }
            }
            TextInput {
                label: "Comment",
                value: comment(),
                on_input: move |value| comment.set(value),
            }
            button {
                style: "align-self: flex-end; padding: 6px 14px; background: {ACCENT_OK}; border: none; border-radius: 4px; color: white; font-size: 12px; cursor: pointer;",
                onclick: move |_| submit(),
                "Add Annotation"
            }
        }
    }
}
