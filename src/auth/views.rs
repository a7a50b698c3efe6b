use crate::html::{self, attr};

pub fn register_page(status: &str, message: &str, username: &str) -> String {
    let body = format!(
        "<h1>Register</h1>{}\
         <form method=\"post\" action=\"/register\">\
         <label for=\"username\">Username</label>\
         <input id=\"username\" name=\"username\" type=\"text\" value=\"{}\" autocomplete=\"username\" required>\
         <label for=\"password\">Password</label>\
         <input id=\"password\" name=\"password\" type=\"password\" autocomplete=\"new-password\" required>\
         <button type=\"submit\">Create account</button>\
         </form>\
         <p><a href=\"/login\">Already have an account? Log in</a></p>",
        html::banner(status, message),
        attr(username),
    );
    html::page("Register", &body)
}

pub fn login_page(status: &str, message: &str, username: &str) -> String {
    let body = format!(
        "<h1>Login</h1>{}\
         <form method=\"post\" action=\"/login\">\
         <label for=\"username\">Username</label>\
         <input id=\"username\" name=\"username\" type=\"text\" value=\"{}\" autocomplete=\"username\" required>\
         <label for=\"password\">Password</label>\
         <input id=\"password\" name=\"password\" type=\"password\" autocomplete=\"current-password\" required>\
         <button type=\"submit\">Login</button>\
         </form>\
         <p><a href=\"/register\">Create an account</a></p>",
        html::banner(status, message),
        attr(username),
    );
    html::page("Login", &body)
}
