// GraphQL documents sent to the CV tool service.

/// Looks up an employee by Active Directory login. `{username}` is replaced
/// before sending; the service answers with a list under `employeeByAdName`.
pub const EMPLOYEE_BY_AD_NAME: &str = "{employeeByAdName(adName:\"{username}\")\
    {id,firstName,lastName,projects{name},technologyRatings{name}}}";

/// Fills the employee query for a login. Quotes and backslashes in the login are
/// escaped so they cannot terminate the GraphQL string literal.
pub fn employee_query(username: &str) -> String {
    let escaped = username.replace('\\', "\\\\").replace('"', "\\\"");
    EMPLOYEE_BY_AD_NAME.replace("{username}", &escaped)
}
