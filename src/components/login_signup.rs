//! 登录/注册双模式表单
//!
//! 本地校验不通过时不发出任何网络请求；服务端的错误消息原样展示。
//! 登录成功后显式导航到 `/main`（登出方向的跳转由路由服务负责）。

use crate::api::ApiError;
use crate::auth::{self, use_auth};
use crate::components::icons::{Eye, EyeOff};
use crate::web::AbortGuard;
use crate::web::router::use_navigate;
use inventrack_shared::{LoginRequest, RegisterRequest};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 提交前的必填项检查
///
/// 登录需要邮箱和密码，注册额外需要用户名。失败时返回展示给用户的消息，
/// 此时调用方不应发出请求。
fn validate_credentials(
    is_signup: bool,
    name: &str,
    email: &str,
    password: &str,
) -> Result<(), &'static str> {
    let missing = email.is_empty() || password.is_empty() || (is_signup && name.is_empty());
    if missing {
        Err("Please fill in all required fields.")
    } else {
        Ok(())
    }
}

/// 将提交失败映射为表单下方的提示文案
///
/// 请求被取消（组件已卸载）时返回 None，不写任何状态。
fn submit_error_message(err: &ApiError) -> Option<String> {
    match err {
        ApiError::Aborted => None,
        ApiError::MissingToken => Some("Failed to retrieve token.".to_string()),
        ApiError::Network(_) => Some("Failed to connect to the server".to_string()),
        ApiError::Server {
            message: Some(message),
            ..
        } => Some(message.clone()),
        ApiError::Server { message: None, .. }
        | ApiError::Decode(_)
        | ApiError::Unauthorized => Some("An error occurred".to_string()),
    }
}

#[component]
pub fn LoginSignup() -> impl IntoView {
    let ctx = use_auth();
    let navigate = use_navigate();

    let (is_signup, set_is_signup) = signal(false);
    let (show_password, set_show_password) = signal(false);
    let (name, set_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    // 组件卸载时取消仍在途的登录/注册请求
    // AbortGuard 持有 JS 值（非 Send），经 StoredValue 的本地存储托管
    let abort = StoredValue::new_local(AbortGuard::new());
    on_cleanup(move || abort.with_value(|guard| guard.abort()));

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();

        let signup = is_signup.get();
        if let Err(msg) =
            validate_credentials(signup, &name.get(), &email.get(), &password.get())
        {
            set_error_msg.set(Some(msg.to_string()));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        let navigate = navigate.clone();
        let abort_signal = abort.with_value(|guard| guard.signal());
        spawn_local(async move {
            let result = if signup {
                let req = RegisterRequest {
                    name: name.get_untracked(),
                    password: password.get_untracked(),
                    email: email.get_untracked(),
                };
                auth::register(&ctx, &req, abort_signal.as_ref()).await
            } else {
                let req = LoginRequest {
                    email: email.get_untracked(),
                    password: password.get_untracked(),
                };
                auth::login(&ctx, &req, abort_signal.as_ref()).await
            };

            match result {
                Ok(()) => navigate("/main"),
                Err(e) => {
                    web_sys::console::error_1(&format!("[LoginSignup] {}", e).into());
                    if let Some(msg) = submit_error_message(&e) {
                        set_error_msg.set(Some(msg));
                        set_is_submitting.set(false);
                    }
                }
            }
        });
    };

    let toggle_mode = move |_| {
        set_is_signup.update(|v| *v = !*v);
        set_error_msg.set(None);
    };

    view! {
        <div class="card shrink-0 w-full max-w-md shadow-2xl bg-base-100">
            <form class="card-body" on:submit=on_submit>
                <h2 class="card-title text-2xl">
                    {move || if is_signup.get() { "Sign Up" } else { "Login" }}
                </h2>

                <Show when=move || error_msg.get().is_some()>
                    <div role="alert" class="alert alert-error text-sm py-2">
                        <span>{move || error_msg.get().unwrap()}</span>
                    </div>
                </Show>

                <Show when=move || is_signup.get()>
                    <div class="form-control">
                        <label class="label" for="name">
                            <span class="label-text">"Username"</span>
                        </label>
                        <input
                            id="name"
                            type="text"
                            placeholder="Enter your username"
                            on:input=move |ev| set_name.set(event_target_value(&ev))
                            prop:value=name
                            class="input input-bordered"
                            required
                        />
                    </div>
                </Show>

                <div class="form-control">
                    <label class="label" for="email">
                        <span class="label-text">"Email"</span>
                    </label>
                    <input
                        id="email"
                        type="email"
                        placeholder="Enter your email"
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                        prop:value=email
                        class="input input-bordered"
                        required
                    />
                </div>

                <div class="form-control">
                    <label class="label" for="password">
                        <span class="label-text">"Password"</span>
                    </label>
                    <div class="join w-full">
                        <input
                            id="password"
                            type=move || if show_password.get() { "text" } else { "password" }
                            placeholder="Enter your password"
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                            prop:value=password
                            class="input input-bordered join-item w-full"
                            required
                        />
                        <button
                            type="button"
                            class="btn btn-ghost join-item"
                            on:click=move |_| set_show_password.update(|v| *v = !*v)
                        >
                            {move || if show_password.get() {
                                view! { <EyeOff attr:class="h-4 w-4" /> }.into_any()
                            } else {
                                view! { <Eye attr:class="h-4 w-4" /> }.into_any()
                            }}
                        </button>
                    </div>
                </div>

                <div class="form-control mt-6">
                    <button class="btn btn-primary" disabled=move || is_submitting.get()>
                        {move || if is_submitting.get() {
                            view! { <span class="loading loading-spinner"></span> "Please wait..." }
                                .into_any()
                        } else if is_signup.get() {
                            "Sign Up".into_any()
                        } else {
                            "Login".into_any()
                        }}
                    </button>
                </div>

                <p class="text-sm text-center mt-2">
                    {move || if is_signup.get() {
                        "Already have an account? "
                    } else {
                        "Don't have an account? "
                    }}
                    <a class="link link-primary" on:click=toggle_mode>
                        {move || if is_signup.get() { "Login" } else { "Sign Up" }}
                    </a>
                </p>
            </form>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_login_needs_email_and_password() {
        assert!(validate_credentials(false, "", "a@b.c", "pw").is_ok());
        assert_eq!(
            validate_credentials(false, "", "", "pw"),
            Err("Please fill in all required fields.")
        );
        assert_eq!(
            validate_credentials(false, "", "a@b.c", ""),
            Err("Please fill in all required fields.")
        );
    }

    #[test]
    fn test_validate_signup_also_needs_username() {
        assert_eq!(
            validate_credentials(true, "", "a@b.c", "pw"),
            Err("Please fill in all required fields.")
        );
        assert!(validate_credentials(true, "alice", "a@b.c", "pw").is_ok());
    }

    #[test]
    fn test_missing_token_shows_exact_message() {
        assert_eq!(
            submit_error_message(&ApiError::MissingToken).as_deref(),
            Some("Failed to retrieve token.")
        );
    }

    #[test]
    fn test_server_message_is_surfaced_verbatim() {
        let err = ApiError::Server {
            status: 400,
            message: Some("Invalid credentials".to_string()),
        };
        assert_eq!(submit_error_message(&err).as_deref(), Some("Invalid credentials"));

        let err = ApiError::Server {
            status: 500,
            message: None,
        };
        assert_eq!(submit_error_message(&err).as_deref(), Some("An error occurred"));
    }

    #[test]
    fn test_network_failure_gets_generic_message() {
        assert_eq!(
            submit_error_message(&ApiError::Network("down".to_string())).as_deref(),
            Some("Failed to connect to the server")
        );
    }

    #[test]
    fn test_aborted_submit_shows_nothing() {
        assert_eq!(submit_error_message(&ApiError::Aborted), None);
    }
}
