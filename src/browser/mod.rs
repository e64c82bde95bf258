//! 浏览器连接
//!
//! 通过调试端口附着到用户已经打开的浏览器，扫描的就是用户正在
//! 看的那个页面，所以这里只找现成页面，不新建标签页。

pub mod connection;

pub use connection::connect_to_browser_and_page;
