mod helpers;
mod images;
mod login;
mod logout;
mod payments;
mod register;
