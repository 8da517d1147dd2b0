/// Link, product and collection ids are opaque strings issued by the content API.
pub type EntityId = String;
