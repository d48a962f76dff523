use gloo_net::http::Request;
use gloo_timers::callback::Timeout;
use std::rc::Rc;
use url::Url;
use wasm_bindgen::{closure::Closure, JsCast};
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    window, AddEventListenerOptions, Event, HtmlElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement,
    KeyboardEvent, MouseEvent, RequestMode,
};
use yew::prelude::*;

use crate::config::SiteConfig;
use crate::contact::{
    sent_toast, ContactAction, ContactState, Field, SubmitError, Submission, FORM_CONTENT_TYPE,
    SERVICE_OPTIONS, STATUS_RESET_MS,
};
use crate::content::{
    header_is_scrolled, CONTACT_EMAIL, COPYRIGHT, MONOGRAM, NAV_LINKS, OWNER_NAME, PORTRAIT_URL,
    SKILLS, SOCIAL_LINKS, STATS,
};
use crate::logging::{self, log_event};
use crate::modal::{is_escape_key, DismissReason, ModalHost, ModalSession};
use crate::projects::{parse_feed, projects_or_fallback, FeedError, Project, SKELETON_CARDS};
use crate::toast::{ExpiryTimer, Toast, ToastDraft, ToastExpiry, ToastId, ToastQueue};

fn now_ms() -> u64 {
    js_sys::Date::now() as u64
}

fn document_body() -> Option<HtmlElement> {
    window()?.document()?.body()
}

async fn fetch_projects(source: &str) -> Result<Vec<Project>, FeedError> {
    let response = Request::get(source)
        .send()
        .await
        .map_err(|error| FeedError::Transport(error.to_string()))?;

    if !response.ok() {
        return Err(FeedError::Status(response.status()));
    }

    let body = response
        .text()
        .await
        .map_err(|error| FeedError::Transport(error.to_string()))?;

    parse_feed(&body)
}

/// Sends the form without reading the reply. Only a failure to dispatch at
/// all is reported; an opaque `no-cors` response is indistinguishable from
/// success.
async fn dispatch_submission(submission: &Submission) -> Result<(), SubmitError> {
    let request = Request::post(submission.endpoint.as_str())
        .mode(RequestMode::NoCors)
        .header("Content-Type", FORM_CONTENT_TYPE)
        .body(submission.body.clone())
        .map_err(|error| SubmitError::Dispatch(error.to_string()))?;

    request
        .send()
        .await
        .map_err(|error| SubmitError::Dispatch(error.to_string()))?;

    Ok(())
}

enum ToastAction {
    Push(ToastDraft),
    Remove(ToastId),
}

impl Reducible for ToastQueue {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();

        match action {
            ToastAction::Push(draft) => {
                next.add(draft, now_ms());
            }
            ToastAction::Remove(id) => {
                if !next.remove(id) {
                    return self;
                }
            }
        }

        Rc::new(next)
    }
}

impl Reducible for ContactState {
    type Action = ContactAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        Rc::new(self.apply(action))
    }
}

/// Browser side of the modal: body overflow and a window `keydown` listener.
struct BrowserModalHost {
    on_close: Callback<DismissReason>,
    listener: Option<Closure<dyn Fn(KeyboardEvent)>>,
}

impl BrowserModalHost {
    fn new(on_close: Callback<DismissReason>) -> Self {
        Self {
            on_close,
            listener: None,
        }
    }
}

impl ModalHost for BrowserModalHost {
    fn lock_scroll(&mut self) {
        if let Some(body) = document_body() {
            let _ = body.style().set_property("overflow", "hidden");
        }
    }

    fn unlock_scroll(&mut self) {
        if let Some(body) = document_body() {
            let _ = body.style().remove_property("overflow");
        }
    }

    fn attach_escape_listener(&mut self) {
        let Some(win) = window() else {
            return;
        };

        let on_close = self.on_close.clone();
        let listener = Closure::<dyn Fn(KeyboardEvent)>::new(move |event: KeyboardEvent| {
            if is_escape_key(&event.key()) {
                on_close.emit(DismissReason::Escape);
            }
        });

        if win
            .add_event_listener_with_callback("keydown", listener.as_ref().unchecked_ref())
            .is_ok()
        {
            self.listener = Some(listener);
        }
    }

    fn detach_escape_listener(&mut self) {
        let Some(listener) = self.listener.take() else {
            return;
        };

        if let Some(win) = window() {
            let _ = win.remove_event_listener_with_callback("keydown", listener.as_ref().unchecked_ref());
        }
    }
}

/// Browser side of toast expiry: a `gloo_timers` timeout that emits the id.
struct BrowserExpiryTimer {
    on_expire: Callback<ToastId>,
    timeout: Option<Timeout>,
}

impl BrowserExpiryTimer {
    fn new(on_expire: Callback<ToastId>) -> Self {
        Self {
            on_expire,
            timeout: None,
        }
    }
}

impl ExpiryTimer for BrowserExpiryTimer {
    fn schedule(&mut self, id: ToastId, delay_ms: u32) {
        let on_expire = self.on_expire.clone();
        self.timeout = Some(Timeout::new(delay_ms, move || on_expire.emit(id)));
    }

    fn cancel(&mut self, _id: ToastId) {
        if let Some(timeout) = self.timeout.take() {
            timeout.cancel();
        }
    }
}

#[derive(Properties, PartialEq)]
struct ToastViewProps {
    toast: Toast,
    on_remove: Callback<ToastId>,
}

#[function_component(ToastView)]
fn toast_view(props: &ToastViewProps) -> Html {
    {
        let on_remove = props.on_remove.clone();
        use_effect_with(props.toast.id, move |id| {
            let expiry = ToastExpiry::start(BrowserExpiryTimer::new(on_remove), *id);
            move || drop(expiry)
        });
    }

    let on_dismiss = {
        let on_remove = props.on_remove.clone();
        let id = props.toast.id;
        Callback::from(move |_: MouseEvent| on_remove.emit(id))
    };

    let kind = props.toast.kind;

    html! {
        <div class={classes!("toast", kind.as_str())} role="status">
            <div class="toast-icon" aria-hidden="true">{kind.icon()}</div>
            <div class="toast-content">
                <div class="toast-title">{props.toast.title.clone()}</div>
                <div class="toast-msg">{props.toast.message.clone()}</div>
            </div>
            <button class="toast-dismiss" type="button" aria-label="Dismiss notification" onclick={on_dismiss}>
                {"✕"}
            </button>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct VideoModalProps {
    project: Project,
    on_close: Callback<DismissReason>,
}

#[function_component(VideoModal)]
fn video_modal(props: &VideoModalProps) -> Html {
    {
        let on_close = props.on_close.clone();
        use_effect_with(props.project.title.clone(), move |title| {
            let session = ModalSession::open(BrowserModalHost::new(on_close), title);
            move || drop(session)
        });
    }

    let on_backdrop = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(DismissReason::Backdrop))
    };

    let on_close_button = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(DismissReason::CloseButton))
    };

    let keep_open = Callback::from(|event: MouseEvent| event.stop_propagation());
    let project = &props.project;
    let player = project.embed_url();

    html! {
        <div class="modal-backdrop" onclick={on_backdrop} role="dialog" aria-modal="true" aria-labelledby="modal-title">
            <div class="modal-box" onclick={keep_open}>
                <div class="modal-header">
                    <div class="modal-meta">
                        <span class="modal-type">{project.kind.clone()}</span>
                        <h3 id="modal-title" class="modal-title">{project.title.clone()}</h3>
                    </div>
                    <button class="modal-close" type="button" aria-label="Close video" onclick={on_close_button}>
                        {"✕"}
                    </button>
                </div>
                <div class="modal-video">
                    if let Some(src) = player {
                        <iframe
                            src={src}
                            title={project.title.clone()}
                            allow="autoplay; fullscreen"
                            allowfullscreen=true
                        />
                    }
                </div>
                if !project.description.is_empty() {
                    <p class="modal-desc">{project.description.clone()}</p>
                }
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct ProjectCardProps {
    project: Project,
    on_open: Callback<Project>,
}

#[function_component(ProjectCard)]
fn project_card(props: &ProjectCardProps) -> Html {
    let player = {
        let project = props.project.clone();
        use_memo(props.project.video_url.clone(), move |_| project.embed_url())
    };
    let playable = player.is_some();

    let onclick = {
        let project = props.project.clone();
        let on_open = props.on_open.clone();
        Callback::from(move |_: MouseEvent| {
            if playable {
                on_open.emit(project.clone());
            }
        })
    };

    let project = &props.project;

    html! {
        <div class={classes!("project-card", (!playable).then_some("no-video-card"))} onclick={onclick}>
            <img
                src={project.thumbnail.clone()}
                alt={project.title.clone()}
                class="project-thumbnail"
                loading="lazy"
            />
            <span class="project-badge">{project.kind.clone()}</span>
            if playable {
                <div class="project-play" aria-hidden="true">
                    <svg width="14" height="16" viewBox="0 0 14 16" fill="white">
                        <path d="M0 0l14 8L0 16V0z" />
                    </svg>
                </div>
            }
            <div class="project-overlay">
                <h3 class="project-title">{project.title.clone()}</h3>
                <p class="project-type">{project.kind.clone()}</p>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct PortfolioGridProps {
    loading: bool,
    projects: Rc<Vec<Project>>,
    on_open: Callback<Project>,
}

#[function_component(PortfolioGrid)]
fn portfolio_grid(props: &PortfolioGridProps) -> Html {
    html! {
        <section class="portfolio" id="work">
            <div class="section-header">
                <span class="section-label">{"Selected Projects"}</span>
                <h2 class="section-title">{"Recent Work"}</h2>
            </div>
            <div class="portfolio-grid" aria-busy={props.loading.to_string()}>
                if props.loading {
                    { for (0..SKELETON_CARDS).map(|index| html! { <div key={index.to_string()} class="skeleton" /> }) }
                } else {
                    { for props.projects.iter().enumerate().map(|(index, project)| html! {
                        <ProjectCard
                            key={index.to_string()}
                            project={project.clone()}
                            on_open={props.on_open.clone()}
                        />
                    }) }
                }
            </div>
        </section>
    }
}

fn control_value(event: &Event) -> Option<String> {
    let target = event.target()?;

    if let Some(input) = target.dyn_ref::<HtmlInputElement>() {
        return Some(input.value());
    }
    if let Some(area) = target.dyn_ref::<HtmlTextAreaElement>() {
        return Some(area.value());
    }
    target.dyn_ref::<HtmlSelectElement>().map(HtmlSelectElement::value)
}

#[derive(Properties, PartialEq)]
struct ContactFormProps {
    relay: Option<Url>,
    on_toast: Callback<ToastDraft>,
}

#[function_component(ContactForm)]
fn contact_form(props: &ContactFormProps) -> Html {
    let contact = use_reducer(ContactState::default);

    let on_edit = |field: Field| {
        let contact = contact.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(value) = control_value(&event) {
                contact.dispatch(ContactAction::Edit(field, value));
            }
        })
    };

    let onsubmit = {
        let contact = contact.clone();
        let relay = props.relay.clone();
        let on_toast = props.on_toast.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();

            let submission = match contact.prepare(relay.as_ref()) {
                Ok(submission) => submission,
                Err(error) => {
                    log_event(
                        log::Level::Warn,
                        "contact_submit_blocked",
                        serde_json::json!({
                            "error_class": error.class(),
                            "status": contact.status.as_str(),
                        }),
                    );
                    on_toast.emit(error.toast());
                    return;
                }
            };

            let attempt = submission.attempt;
            contact.dispatch(ContactAction::Begin { attempt });
            log_event(
                log::Level::Info,
                "contact_submit_start",
                serde_json::json!({
                    "attempt": attempt,
                    "relay_host": submission.endpoint.host_str().unwrap_or("unknown"),
                }),
            );

            let contact = contact.clone();
            let on_toast = on_toast.clone();
            spawn_local(async move {
                let outcome = dispatch_submission(&submission).await;

                match &outcome {
                    Ok(()) => {
                        log_event(
                            log::Level::Info,
                            "contact_submit_dispatched",
                            serde_json::json!({ "attempt": attempt }),
                        );
                        on_toast.emit(sent_toast());
                    }
                    Err(error) => {
                        log_event(
                            log::Level::Error,
                            "contact_submit_failed",
                            serde_json::json!({
                                "attempt": attempt,
                                "error_class": error.class(),
                                "message": error.to_string(),
                            }),
                        );
                        on_toast.emit(error.toast());
                    }
                }

                contact.dispatch(ContactAction::Finish { attempt, outcome });
            });
        })
    };

    {
        let contact = contact.clone();
        use_effect_with(contact.pending_reset(), move |pending| {
            let reset = pending.map(|attempt| {
                Timeout::new(STATUS_RESET_MS, move || {
                    contact.dispatch(ContactAction::Reset { attempt })
                })
            });
            move || drop(reset)
        });
    }

    let draft = &contact.draft;

    html! {
        <form class="contact-form" onsubmit={onsubmit}>
            <div class="form-row">
                <div class="form-group">
                    <label for="name">{"Your Name"}</label>
                    <input
                        id="name"
                        name="name"
                        type="text"
                        placeholder="John Doe"
                        value={draft.name.clone()}
                        oninput={on_edit(Field::Name)}
                        required=true
                    />
                </div>
                <div class="form-group">
                    <label for="email">{"Email Address"}</label>
                    <input
                        id="email"
                        name="email"
                        type="email"
                        placeholder="john@example.com"
                        value={draft.email.clone()}
                        oninput={on_edit(Field::Email)}
                        required=true
                    />
                </div>
            </div>

            <div class="form-group">
                <label for="service">{"Project Type"}</label>
                <select id="service" name="service" oninput={on_edit(Field::Service)} required=true>
                    <option value="" selected={draft.service.is_empty()}>{"Select a service…"}</option>
                    { for SERVICE_OPTIONS.iter().map(|option| html! {
                        <option value={*option} selected={draft.service == *option}>{*option}</option>
                    }) }
                </select>
            </div>

            <div class="form-group">
                <label for="message">{"Message"}</label>
                <textarea
                    id="message"
                    name="message"
                    placeholder="Tell me about your project, timeline, and budget…"
                    value={draft.message.clone()}
                    oninput={on_edit(Field::Message)}
                    required=true
                />
            </div>

            <button class="btn-submit" type="submit" disabled={contact.is_sending()}>
                if contact.is_sending() {
                    <div class="spinner" aria-hidden="true" />
                }
                {contact.status.button_label()}
            </button>
        </form>
    }
}

#[derive(Properties, PartialEq)]
struct SiteHeaderProps {
    scrolled: bool,
}

#[function_component(SiteHeader)]
fn site_header(props: &SiteHeaderProps) -> Html {
    html! {
        <header class={classes!("header", props.scrolled.then_some("scrolled"))}>
            <div class="logo">{MONOGRAM}</div>
            <nav>
                { for NAV_LINKS.iter().map(|(label, href)| html! { <a href={*href}>{*label}</a> }) }
            </nav>
        </header>
    }
}

#[derive(Properties, PartialEq)]
struct HeroProps {
    resume_url: AttrValue,
}

#[function_component(Hero)]
fn hero(props: &HeroProps) -> Html {
    html! {
        <section class="hero">
            <div class="hero-content">
                <p class="hero-eyebrow">{"Video Editor & Post-Production Specialist"}</p>
                <h1>{"Crafting Stories"}<br /><em>{"Through Motion"}</em></h1>
                <p class="hero-sub">
                    {"Award-winning editor specialising in documentaries, brand films, and commercial work \
                      that moves audiences and drives results."}
                </p>
                <div class="hero-buttons">
                    <a href="#work" class="btn btn-primary">{"View Selected Work"}</a>
                    <a href={props.resume_url.clone()} class="btn btn-secondary" download="">{"Download Résumé"}</a>
                </div>
            </div>
            <div class="scroll-line" aria-hidden="true">
                <span>{"Scroll"}</span>
                <div class="scroll-line-bar" />
            </div>
        </section>
    }
}

#[function_component(About)]
fn about() -> Html {
    html! {
        <section class="about" id="about">
            <div class="about-grid">
                <div class="about-image-wrap">
                    <img src={PORTRAIT_URL} alt={OWNER_NAME} class="profile-img" />
                    <div class="about-image-accent" />
                </div>
                <div class="about-text">
                    <span class="section-label">{"About Me"}</span>
                    <h2>{"8 Years Telling Stories"}<br />{"That Matter"}</h2>
                    <p>
                        {"I'm Alex Rivera, a Los Angeles-based video editor with a passion for \
                          narrative-driven content. From documentary features to 30-second commercials, \
                          I bring the same obsessive attention to pacing, rhythm, and emotion."}
                    </p>
                    <p>
                        {"My work has aired on Netflix, won at Sundance, and driven millions in revenue \
                          for Fortune 500 brands. Every cut is intentional. Every frame earns its place."}
                    </p>
                    <div class="skills-list">
                        { for SKILLS.iter().map(|skill| html! { <span key={*skill} class="skill-tag">{*skill}</span> }) }
                    </div>
                </div>
            </div>
            <div class="stats-row">
                { for STATS.iter().map(|stat| html! {
                    <div key={stat.label} class="stat-item">
                        <span class="stat-num">{stat.value}</span>
                        <span class="stat-lbl">{stat.label}</span>
                    </div>
                }) }
            </div>
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct ContactSectionProps {
    relay: Option<Url>,
    on_toast: Callback<ToastDraft>,
}

#[function_component(ContactSection)]
fn contact_section(props: &ContactSectionProps) -> Html {
    html! {
        <section class="contact" id="contact">
            <div class="contact-layout">
                <div class="contact-info">
                    <span class="section-label">{"Get in Touch"}</span>
                    <h2>{"Let's Create Something Together"}</h2>
                    <p>
                        {"Have a project in mind? Whether it's a documentary, commercial, or music video, \
                          I'd love to hear about it. Fill in the form and I'll get back to you within 24 hours."}
                    </p>
                    <a href={format!("mailto:{CONTACT_EMAIL}")} class="contact-email-link">
                        {CONTACT_EMAIL}{" "}<span aria-hidden="true">{"→"}</span>
                    </a>
                </div>
                <ContactForm relay={props.relay.clone()} on_toast={props.on_toast.clone()} />
            </div>
        </section>
    }
}

#[function_component(SiteFooter)]
fn site_footer() -> Html {
    html! {
        <footer>
            <div class="footer-logo">{MONOGRAM}</div>
            <div class="footer-links">
                { for SOCIAL_LINKS.iter().map(|(label, href)| html! {
                    <a href={*href} target="_blank" rel="noopener noreferrer">{*label}</a>
                }) }
            </div>
            <div class="footer-copy">{COPYRIGHT}</div>
        </footer>
    }
}

#[derive(Properties, PartialEq)]
struct AppProps {
    config: Rc<SiteConfig>,
}

#[function_component(App)]
fn app(props: &AppProps) -> Html {
    let projects = use_state(|| Rc::new(Vec::<Project>::new()));
    let loading = use_state(|| true);
    let modal_project = use_state(|| None::<Project>);
    let toasts = use_reducer(ToastQueue::default);
    let scrolled = use_state_eq(|| false);

    {
        let projects = projects.clone();
        let loading = loading.clone();
        let source = props.config.data_source_url.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                let result = fetch_projects(&source).await;
                projects.set(Rc::new(projects_or_fallback(result, &source)));
                loading.set(false);
            });
            || ()
        });
    }

    {
        let scrolled = scrolled.clone();
        use_effect_with((), move |_| {
            let listener = window().and_then(|win| {
                let callback = Closure::<dyn Fn()>::new(move || {
                    if let Some(scroll_y) = window().and_then(|w| w.scroll_y().ok()) {
                        scrolled.set(header_is_scrolled(scroll_y));
                    }
                });
                let options = AddEventListenerOptions::new();
                options.set_passive(true);
                win.add_event_listener_with_callback_and_add_event_listener_options(
                    "scroll",
                    callback.as_ref().unchecked_ref(),
                    &options,
                )
                .ok()
                .map(|()| callback)
            });

            move || {
                if let (Some(win), Some(callback)) = (window(), listener) {
                    let _ = win.remove_event_listener_with_callback("scroll", callback.as_ref().unchecked_ref());
                }
            }
        });
    }

    let on_toast = {
        let toasts = toasts.clone();
        Callback::from(move |draft: ToastDraft| toasts.dispatch(ToastAction::Push(draft)))
    };

    let on_remove_toast = {
        let toasts = toasts.clone();
        Callback::from(move |id: ToastId| toasts.dispatch(ToastAction::Remove(id)))
    };

    let on_open = {
        let modal_project = modal_project.clone();
        Callback::from(move |project: Project| modal_project.set(Some(project)))
    };

    let on_close = {
        let modal_project = modal_project.clone();
        Callback::from(move |reason: DismissReason| {
            log_event(
                log::Level::Debug,
                "modal_dismissed",
                serde_json::json!({ "reason": reason.as_str() }),
            );
            modal_project.set(None);
        })
    };

    html! {
        <>
            <SiteHeader scrolled={*scrolled} />
            <main id="content">
                <Hero resume_url={AttrValue::from(props.config.resume_url.clone())} />
                <PortfolioGrid loading={*loading} projects={(*projects).clone()} on_open={on_open} />
                <About />
                <ContactSection relay={props.config.form_relay_url.clone()} on_toast={on_toast} />
            </main>
            <SiteFooter />
            if let Some(project) = (*modal_project).clone() {
                <VideoModal project={project} on_close={on_close} />
            }
            <div class="toast-stack" aria-live="polite">
                { for toasts.iter().map(|toast| html! {
                    <ToastView key={toast.id.to_string()} toast={toast.clone()} on_remove={on_remove_toast.clone()} />
                }) }
            </div>
        </>
    }
}

pub fn run() {
    logging::init(log::LevelFilter::Info);
    let config = SiteConfig::from_build_env();
    logging::init(config.log_level);

    log_event(
        log::Level::Info,
        "site_config_resolved",
        serde_json::json!({
            "data_source_url": config.data_source_url.as_str(),
            "resume_url": config.resume_url.as_str(),
            "relay_configured": config.relay_configured(),
        }),
    );

    yew::Renderer::<App>::with_root_and_props(
        window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("app"))
            .expect("missing #app mount point"),
        AppProps {
            config: Rc::new(config),
        },
    )
    .render();
}
